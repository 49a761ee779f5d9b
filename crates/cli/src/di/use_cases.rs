use super::DnsServices;
use std::sync::Arc;
use sysresolver_application::use_cases::LookupUseCase;

pub struct UseCases {
    pub lookup: Arc<LookupUseCase>,
}

impl UseCases {
    pub fn new(services: &DnsServices) -> Self {
        Self {
            lookup: Arc::new(LookupUseCase::new(services.resolver.clone())),
        }
    }
}

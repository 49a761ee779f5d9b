use super::name::write_name;
use sysresolver_domain::{DomainError, HeaderFlags, Question, HEADER_LEN};

/// Builds a recursive standard query for `question` with transaction `id`.
///
/// The name is written uncompressed and every count except QDCOUNT is zero.
pub fn encode(question: &Question, id: u16) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + question.name.encoded_len() + 4);

    let flags = HeaderFlags {
        recursion_desired: true,
        ..HeaderFlags::default()
    };
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&flags.to_u16().to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&[0; 6]);

    write_name(&mut buf, &question.name)?;
    buf.extend_from_slice(&question.record_type.to_u16().to_be_bytes());
    buf.extend_from_slice(&question.class.to_u16().to_be_bytes());

    Ok(buf)
}

/// [`encode`] with a random transaction id, returned alongside the bytes.
pub fn encode_query(question: &Question) -> Result<(u16, Vec<u8>), DomainError> {
    let id = fastrand::u16(..);
    let bytes = encode(question, id)?;
    Ok((id, bytes))
}

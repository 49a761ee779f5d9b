use super::cursor::Cursor;
use super::MAX_POINTER_HOPS;
use sysresolver_domain::{DnsName, DomainError, MAX_NAME_LEN};

const POINTER_TAG: u8 = 0xC0;
const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_OFFSET_MASK: u8 = 0x3F;

/// Reads a possibly compressed name at the cursor.
///
/// The cursor ends up just past the terminating zero octet, or just past the
/// first compression pointer. Pointers must target an offset strictly before
/// the pointer itself.
pub(super) fn read_name(cursor: &mut Cursor<'_>) -> Result<DnsName, DomainError> {
    let buf = cursor.buffer();
    let mut labels: Vec<Vec<u8>> = Vec::new();
    let mut encoded_len = 1usize;

    // In-place labels advance the cursor itself.
    let mut pointer_at = loop {
        let at = cursor.position();
        let len = cursor.read_u8("label length")?;
        match len & LABEL_TYPE_MASK {
            0 if len == 0 => return finish(labels),
            0 => {
                let label = cursor.read_bytes(len as usize, "label")?;
                push_label(&mut labels, &mut encoded_len, label)?;
            }
            POINTER_TAG => {
                let low = cursor.read_u8("compression pointer")?;
                break (at, pointer_target(len, low));
            }
            _ => return Err(unsupported_label_type(len, at)),
        }
    };

    // Everything after the first pointer is read from absolute offsets.
    let mut hops = 0usize;
    loop {
        let (at, target) = pointer_at;
        if target >= at {
            return Err(DomainError::MalformedMessage(format!(
                "compression pointer at offset {} targets offset {}",
                at, target
            )));
        }
        hops += 1;
        if hops > MAX_POINTER_HOPS {
            return Err(DomainError::MalformedMessage(format!(
                "more than {} compression pointers in one name",
                MAX_POINTER_HOPS
            )));
        }

        let mut pos = target;
        pointer_at = loop {
            let len = *buf.get(pos).ok_or_else(|| ran_off(pos, buf.len()))?;
            match len & LABEL_TYPE_MASK {
                0 if len == 0 => return finish(labels),
                0 => {
                    let start = pos + 1;
                    let label = buf
                        .get(start..start + len as usize)
                        .ok_or_else(|| ran_off(start, buf.len()))?;
                    push_label(&mut labels, &mut encoded_len, label)?;
                    pos = start + len as usize;
                }
                POINTER_TAG => {
                    let low = *buf.get(pos + 1).ok_or_else(|| ran_off(pos + 1, buf.len()))?;
                    break (pos, pointer_target(len, low));
                }
                _ => return Err(unsupported_label_type(len, pos)),
            }
        };
    }
}

/// Appends `name` uncompressed.
pub(super) fn write_name(buf: &mut Vec<u8>, name: &DnsName) -> Result<(), DomainError> {
    name.check_limits().map_err(DomainError::EncodingError)?;
    for label in name.labels() {
        if label.is_empty() {
            return Err(DomainError::EncodingError(format!(
                "empty label in {}",
                name
            )));
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(label);
    }
    buf.push(0);
    Ok(())
}

fn pointer_target(high: u8, low: u8) -> usize {
    (((high & POINTER_OFFSET_MASK) as usize) << 8) | low as usize
}

fn push_label(
    labels: &mut Vec<Vec<u8>>,
    encoded_len: &mut usize,
    label: &[u8],
) -> Result<(), DomainError> {
    *encoded_len += label.len() + 1;
    if *encoded_len > MAX_NAME_LEN {
        return Err(DomainError::MalformedMessage(format!(
            "decoded name exceeds {} octets",
            MAX_NAME_LEN
        )));
    }
    labels.push(label.to_vec());
    Ok(())
}

fn finish(labels: Vec<Vec<u8>>) -> Result<DnsName, DomainError> {
    DnsName::from_labels(labels).map_err(|e| DomainError::MalformedMessage(e.to_string()))
}

fn unsupported_label_type(len: u8, at: usize) -> DomainError {
    DomainError::MalformedMessage(format!(
        "unsupported label type 0b{:02b} at offset {}",
        len >> 6,
        at
    ))
}

fn ran_off(pos: usize, len: usize) -> DomainError {
    DomainError::truncated_wire(format!(
        "compressed name reads offset {} of a {}-octet message",
        pos, len
    ))
}

#![allow(dead_code)]
use std::net::Ipv4Addr;

pub const EXAMPLE_COM_ADDR: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// `example.com. 300 IN A 93.184.216.34`, answer name compressed: 45 octets.
pub fn example_com_response(id: u16) -> Vec<u8> {
    let mut response = Vec::with_capacity(45);

    response.extend_from_slice(&id.to_be_bytes());
    response.extend_from_slice(&[0x81, 0x80]); // QR RD RA, NOERROR
    response.extend_from_slice(&[0x00, 0x01]); // QDCOUNT
    response.extend_from_slice(&[0x00, 0x01]); // ANCOUNT
    response.extend_from_slice(&[0x00, 0x00]); // NSCOUNT
    response.extend_from_slice(&[0x00, 0x00]); // ARCOUNT

    response.extend_from_slice(b"\x07example\x03com\x00");
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

    response.extend_from_slice(&[
        0xc0, 0x0c, // pointer to offset 12
        0x00, 0x01, // A
        0x00, 0x01, // IN
        0x00, 0x00, 0x01, 0x2c, // TTL 300
        0x00, 0x04, // RDLENGTH
        93, 184, 216, 34,
    ]);

    response
}

/// Answers `query` in place: copies id and question, sets QR, appends an A
/// record pointing back at the question name.
pub fn answer_for_query(query: &[u8], addr: Ipv4Addr, ttl: u32) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(query.len() + 16);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01]);
    response.extend_from_slice(&ttl.to_be_bytes());
    response.extend_from_slice(&[0x00, 0x04]);
    response.extend_from_slice(&addr.octets());
    response
}

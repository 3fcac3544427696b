//! Range to CIDR decomposition

use crate::error::{BgpeeprError, Result};
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Split the inclusive range `start..=end` into the minimal ordered list of
/// CIDR blocks whose union is exactly that range.
///
/// Both ends must be of the same family and `start <= end`.
pub fn range_to_cidrs(start: IpAddr, end: IpAddr) -> Result<Vec<IpNetwork>> {
    let (first, last, width) = match (start, end) {
        (IpAddr::V4(s), IpAddr::V4(e)) => (u32::from(s) as u128, u32::from(e) as u128, 32u32),
        (IpAddr::V6(s), IpAddr::V6(e)) => (u128::from(s), u128::from(e), 128u32),
        _ => {
            return Err(BgpeeprError::malformed(format!(
                "cannot decompose mixed-family range {} - {}",
                start, end
            )));
        }
    };

    if first > last {
        return Err(BgpeeprError::malformed(format!(
            "cannot decompose reversed range {} - {}",
            start, end
        )));
    }

    let mut blocks = Vec::new();
    let mut cursor = first;

    loop {
        // Largest block aligned at `cursor` that still ends within the range.
        let mut host_bits = cursor.trailing_zeros().min(width);
        while cursor + host_mask(host_bits) > last {
            host_bits -= 1;
        }

        let network = IpNetwork::new(to_addr(cursor, width), (width - host_bits) as u8)
            .map_err(|e| BgpeeprError::malformed(format!("invalid block at {}: {}", cursor, e)))?;
        blocks.push(network);

        let block_end = cursor + host_mask(host_bits);
        if block_end >= last {
            break;
        }
        cursor = block_end + 1;
    }

    Ok(blocks)
}

fn host_mask(host_bits: u32) -> u128 {
    if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

fn to_addr(value: u128, width: u32) -> IpAddr {
    if width == 32 {
        IpAddr::V4(Ipv4Addr::from(value as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(value))
    }
}

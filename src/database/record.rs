//! IPtoASN record parsing

use crate::error::{BgpeeprError, Result};
use std::net::IpAddr;
use std::str::FromStr;

/// One line of the IPtoASN database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub range_start: IpAddr,
    pub range_end: IpAddr,
    /// 0 means the range is not routed
    pub asn: u32,
    pub organization: String,
}

impl Record {
    pub fn is_ipv6(&self) -> bool {
        self.range_start.is_ipv6()
    }

    pub fn is_routed(&self) -> bool {
        self.asn != 0
    }
}

/// Accepts the upstream TSV layout `start\tend\tasn\tcountry\tdescription`
/// and the comma layout `start,end,asn,organization`. Fields are trimmed
/// individually and the organization may be empty; the country column is
/// not kept.
impl FromStr for Record {
    type Err = BgpeeprError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        let (start, end, asn, organization) = if line.contains('\t') {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(BgpeeprError::malformed(format!(
                    "expected 5 tab-separated fields, got {}",
                    fields.len()
                )));
            }
            (fields[0], fields[1], fields[2], fields[4])
        } else {
            let fields: Vec<&str> = line.splitn(4, ',').collect();
            if fields.len() < 4 {
                return Err(BgpeeprError::malformed(format!(
                    "expected 4 comma-separated fields, got {}",
                    fields.len()
                )));
            }
            (fields[0], fields[1], fields[2], fields[3])
        };

        let range_start = parse_addr(start)?;
        let range_end = parse_addr(end)?;
        if range_start.is_ipv4() != range_end.is_ipv4() {
            return Err(BgpeeprError::malformed(format!(
                "mixed address families in range {} - {}",
                range_start, range_end
            )));
        }
        if range_start > range_end {
            return Err(BgpeeprError::malformed(format!(
                "reversed range {} - {}",
                range_start, range_end
            )));
        }

        let asn = asn
            .trim()
            .trim_start_matches("AS")
            .parse::<u32>()
            .map_err(|e| BgpeeprError::malformed(format!("invalid ASN {:?}: {}", asn, e)))?;

        Ok(Record {
            range_start,
            range_end,
            asn,
            organization: organization.trim().to_string(),
        })
    }
}

fn parse_addr(s: &str) -> Result<IpAddr> {
    s.trim()
        .parse::<IpAddr>()
        .map_err(|e| BgpeeprError::malformed(format!("invalid address {:?}: {}", s, e)))
}

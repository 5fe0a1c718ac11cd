//! Identifier helpers

use tracing::warn;
use uuid::Uuid;

/// Return `value` unchanged when it is a hyphenated UUID, the hyphenated form
/// of the same UUID for its simple, braced and `urn:uuid:` spellings, and
/// otherwise a UUIDv5 derived from it in the DNS namespace.
///
/// The fallback is deterministic so the same partner zone name always maps to
/// the same standardized zone id.
pub fn ensure_valid_uuid(value: &str) -> String {
    match Uuid::parse_str(value) {
        Ok(_) if value.len() == 36 => value.to_string(),
        Ok(uuid) => uuid.hyphenated().to_string(),
        Err(_) => {
            let generated = Uuid::new_v5(&Uuid::NAMESPACE_DNS, value.as_bytes()).to_string();
            warn!(original = %value, %generated, "partner id is not a UUID, substituting UUIDv5");
            generated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_uuid_passes_through_unchanged() {
        let id = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        assert_eq!(ensure_valid_uuid(id), id);

        let upper = "3FA85F64-5717-4562-B3FC-2C963F66AFA6";
        assert_eq!(ensure_valid_uuid(upper), upper);
    }

    #[test]
    fn free_form_ids_map_deterministically() {
        for s in ["Omega", "zoneA", "", "edge node 1", "ümlaut-zone"] {
            let first = ensure_valid_uuid(s);
            assert_eq!(first, ensure_valid_uuid(s));
            let parsed = Uuid::parse_str(&first).unwrap();
            assert_eq!(parsed.get_version_num(), 5);
        }
    }

    #[test]
    fn fallback_matches_dns_namespace_v5() {
        assert_eq!(
            ensure_valid_uuid("zoneA"),
            Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"zoneA").to_string()
        );
    }

    #[test]
    fn other_uuid_spellings_keep_their_identity() {
        let hyphenated = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        for spelling in [
            "3fa85f6457174562b3fc2c963f66afa6",
            "{3fa85f64-5717-4562-b3fc-2c963f66afa6}",
            "urn:uuid:3fa85f64-5717-4562-b3fc-2c963f66afa6",
        ] {
            assert_eq!(ensure_valid_uuid(spelling), hyphenated, "{}", spelling);
        }
    }

    #[test]
    fn distinct_inputs_map_to_distinct_ids() {
        assert_ne!(ensure_valid_uuid("zoneA"), ensure_valid_uuid("zoneB"));
    }
}

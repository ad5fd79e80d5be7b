//! Format validation, applied before any persistence attempt.

use crate::error::{NetinvError, NetinvResult};
use crate::models::asset::CreateAsset;

/// Characters permitted in a phone number besides ASCII digits.
const PHONE_PUNCTUATION: &str = "+-() ";

/// A phone number must be digits, `+`, `-`, parentheses, or spaces,
/// and must contain at least one digit.
pub fn phone(value: &str) -> NetinvResult<()> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || PHONE_PUNCTUATION.contains(c))
        && value.chars().any(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(NetinvError::Validation {
            field: "admin_phone".into(),
            message: format!("'{value}' is not a valid phone number"),
        })
    }
}

/// A required field must be non-empty after trimming.
pub fn required(field: &str, value: &str) -> NetinvResult<()> {
    if value.trim().is_empty() {
        Err(NetinvError::Validation {
            field: field.into(),
            message: "required field is empty".into(),
        })
    } else {
        Ok(())
    }
}

/// Full format check for an asset create payload.
pub fn create_asset(input: &CreateAsset) -> NetinvResult<()> {
    required("region", &input.region)?;
    required("title", &input.title)?;
    required("device_model", &input.device_model)?;
    required("device_serial", &input.device_serial)?;
    required("admin_ip", &input.admin_ip)?;
    required("admin_name", &input.admin_name)?;
    if let Some(p) = &input.admin_phone {
        phone(p)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_common_formats() {
        assert!(phone("011-4555-1234").is_ok());
        assert!(phone("+54 (11) 4555 1234").is_ok());
        assert!(phone("45551234").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_empty() {
        assert!(phone("").is_err());
        assert!(phone("call me").is_err());
        assert!(phone("4555-1234 ext").is_err());
        // punctuation-only is not a phone number
        assert!(phone("+-() ").is_err());
    }

    #[test]
    fn required_rejects_whitespace_only() {
        assert!(required("region", "  ").is_err());
        assert!(required("region", "Centro").is_ok());
    }

    fn complete_input() -> CreateAsset {
        CreateAsset {
            region: "Centro".into(),
            title: "UR-I".into(),
            unit_detail: None,
            device_model: "FortiGate 100F".into(),
            device_serial: "FG100F-0001".into(),
            device_tag: None,
            ospf: None,
            admin_ip: "10.0.0.1".into(),
            subnet: None,
            dmz_network: None,
            wifi_network: None,
            status: None,
            admin_group: None,
            admin_name: "Perez, Juan".into(),
            admin_phone: Some("011-4555-1234".into()),
            notes: None,
        }
    }

    #[test]
    fn create_asset_accepts_complete_input() {
        assert!(create_asset(&complete_input()).is_ok());
    }

    #[test]
    fn create_asset_rejects_missing_required_field() {
        let mut input = complete_input();
        input.admin_ip = "".into();
        let err = create_asset(&input).unwrap_err();
        match err {
            crate::NetinvError::Validation { field, .. } => assert_eq!(field, "admin_ip"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn create_asset_rejects_bad_phone() {
        let mut input = complete_input();
        input.admin_phone = Some("not a phone".into());
        assert!(create_asset(&input).is_err());
    }
}

//! Shared helpers used by every seatboard crate: logging setup, startup
//! environment checks and the small JSON envelopes returned by the API.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn ack_serializes_ok_true() {
        let v = serde_json::to_value(types::Ack::ok()).unwrap();
        assert_eq!(v, serde_json::json!({"ok": true}));
    }

    #[test]
    fn error_body_omits_missing_detail() {
        let v = serde_json::to_value(types::ErrorBody::new("Unauthorized")).unwrap();
        assert_eq!(v, serde_json::json!({"error": "Unauthorized"}));

        let v = serde_json::to_value(types::ErrorBody::with_detail("保存に失敗しました", "disk full")).unwrap();
        assert_eq!(v["detail"], "disk full");
    }
}

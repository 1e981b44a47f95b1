use serde_json::Value;

use crate::lookup::{required_text, MissingField};

/// CloudTrail event names that get a human-readable summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // S3
    DeleteBucket,
    PutBucketPolicy,
    DeleteBucketPolicy,
    // IAM
    CreateAccessKey,
    DeleteAccessKey,
    UpdateRole,
    DeleteRole,
    // Console sign-in
    ConsoleLogin,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::DeleteBucket,
        EventKind::PutBucketPolicy,
        EventKind::DeleteBucketPolicy,
        EventKind::CreateAccessKey,
        EventKind::DeleteAccessKey,
        EventKind::UpdateRole,
        EventKind::DeleteRole,
        EventKind::ConsoleLogin,
    ];

    pub fn from_name(name: &str) -> Option<EventKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::DeleteBucket => "DeleteBucket",
            EventKind::PutBucketPolicy => "PutBucketPolicy",
            EventKind::DeleteBucketPolicy => "DeleteBucketPolicy",
            EventKind::CreateAccessKey => "CreateAccessKey",
            EventKind::DeleteAccessKey => "DeleteAccessKey",
            EventKind::UpdateRole => "UpdateRole",
            EventKind::DeleteRole => "DeleteRole",
            EventKind::ConsoleLogin => "ConsoleLogin",
        }
    }

    /// Builds the summary sentence for this kind from the event `detail`.
    ///
    /// # Returns
    /// * `Err(MissingField)` - naming the first required field that is absent
    pub fn describe(&self, detail: &Value) -> Result<String, MissingField> {
        let description = match self {
            EventKind::DeleteBucket => format!(
                "Bucket \"{}\" was deleted by {}",
                required_text(detail, &["requestParameters", "bucketName"])?,
                actor(detail)?
            ),
            EventKind::PutBucketPolicy => format!(
                "Bucket \"{}\" policy added by {}",
                required_text(detail, &["requestParameters", "bucketName"])?,
                actor(detail)?
            ),
            EventKind::DeleteBucketPolicy => format!(
                "Bucket \"{}\" policy deleted by {}",
                required_text(detail, &["requestParameters", "bucketName"])?,
                actor(detail)?
            ),
            EventKind::CreateAccessKey => format!(
                "Access Key \"{}\" for user \"{}\" created by {}",
                required_text(detail, &["responseElements", "accessKey", "accessKeyId"])?,
                required_text(detail, &["requestParameters", "userName"])?,
                actor(detail)?
            ),
            EventKind::DeleteAccessKey => format!(
                "Access Key \"{}\" for user \"{}\" deleted by {}",
                required_text(detail, &["requestParameters", "accessKeyId"])?,
                required_text(detail, &["requestParameters", "userName"])?,
                actor(detail)?
            ),
            EventKind::UpdateRole => format!(
                "Role \"{}\" updated by {}",
                required_text(detail, &["requestParameters", "roleName"])?,
                actor(detail)?
            ),
            EventKind::DeleteRole => format!(
                "Role \"{}\" deleted by {}",
                required_text(detail, &["requestParameters", "roleName"])?,
                actor(detail)?
            ),
            EventKind::ConsoleLogin => format!(
                "Root user console login from IP: \"{}\"",
                required_text(detail, &["sourceIPAddress"])?
            ),
        };

        Ok(description)
    }
}

// `"{type}" "{arn}"` of whoever made the call
fn actor(detail: &Value) -> Result<String, MissingField> {
    Ok(format!(
        "\"{}\" \"{}\"",
        required_text(detail, &["userIdentity", "type"])?,
        required_text(detail, &["userIdentity", "arn"])?
    ))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail() -> Value {
        json!({
            "requestParameters": {
                "bucketName": "logs",
                "userName": "bob",
                "roleName": "deployer",
                "accessKeyId": "AKIAOLD"
            },
            "responseElements": { "accessKey": { "accessKeyId": "AKIANEW" } },
            "userIdentity": { "type": "Root", "arn": "arn:aws:iam::123:root" },
            "sourceIPAddress": "10.0.0.1"
        })
    }

    #[test]
    fn from_name_matches_every_kind_exactly() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("deletebucket"), None);
        assert_eq!(EventKind::from_name(""), None);
        assert_eq!(EventKind::from_name("GetObject"), None);
    }

    #[test]
    fn describes_every_kind() {
        let detail = detail();
        let expected = [
            (EventKind::DeleteBucket, r#"Bucket "logs" was deleted by "Root" "arn:aws:iam::123:root""#),
            (EventKind::PutBucketPolicy, r#"Bucket "logs" policy added by "Root" "arn:aws:iam::123:root""#),
            (EventKind::DeleteBucketPolicy, r#"Bucket "logs" policy deleted by "Root" "arn:aws:iam::123:root""#),
            (EventKind::CreateAccessKey, r#"Access Key "AKIANEW" for user "bob" created by "Root" "arn:aws:iam::123:root""#),
            (EventKind::DeleteAccessKey, r#"Access Key "AKIAOLD" for user "bob" deleted by "Root" "arn:aws:iam::123:root""#),
            (EventKind::UpdateRole, r#"Role "deployer" updated by "Root" "arn:aws:iam::123:root""#),
            (EventKind::DeleteRole, r#"Role "deployer" deleted by "Root" "arn:aws:iam::123:root""#),
            (EventKind::ConsoleLogin, r#"Root user console login from IP: "10.0.0.1""#),
        ];

        for (kind, sentence) in expected {
            assert_eq!(kind.describe(&detail).unwrap(), sentence, "{:?}", kind);
        }
    }

    #[test]
    fn reports_first_missing_field() {
        let detail = json!({
            "requestParameters": { "accessKeyId": "AKIA" },
            "userIdentity": { "type": "IAMUser" }
        });

        let err = EventKind::DeleteAccessKey.describe(&detail).unwrap_err();
        assert_eq!(err.path, "requestParameters.userName");

        let err = EventKind::UpdateRole.describe(&detail).unwrap_err();
        assert_eq!(err.path, "requestParameters.roleName");
    }

    #[test]
    fn console_login_needs_only_source_ip() {
        let detail = json!({ "sourceIPAddress": "1.2.3.4" });
        assert_eq!(
            EventKind::ConsoleLogin.describe(&detail).unwrap(),
            r#"Root user console login from IP: "1.2.3.4""#
        );
        assert!(EventKind::DeleteRole.describe(&detail).is_err());
    }
}

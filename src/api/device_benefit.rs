use crate::api::error::PortalAPIError;
use crate::api::types::device_benefit::DeviceBenefit;
use crate::api::PortalAPI;
use log::{debug, error, warn};
use serde_json::{Map, Value};

impl PortalAPI {
    /// Raw benefit objects as the portal returns them
    pub async fn device_benefits(&mut self) -> Result<Vec<Map<String, Value>>, PortalAPIError> {
        let team_id = match &self.session.team_id {
            Some(id) => id.clone(),
            None => return Err(PortalAPIError::InvalidParams),
        };
        let url = self.endpoint("account/ios/device/listDeviceBenefits.action")?;
        match self
            .authorized_post_client(url)?
            .form(&[("teamId", team_id)])
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                if status == reqwest::StatusCode::OK {
                    self.store_csrf(response.headers());
                    match response.json::<Value>().await {
                        Ok(body) => parse_benefits(body),
                        Err(e) => {
                            error!("{:?}", e);
                            Err(PortalAPIError::Unknown)
                        }
                    }
                } else if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN
                {
                    warn!("{} for device benefits, session expired?", status);
                    Err(PortalAPIError::InvalidCredentials)
                } else if status.is_server_error() {
                    error!("Server Error");
                    Err(PortalAPIError::Server)
                } else {
                    warn!(
                        "{} result: {}",
                        status,
                        response.text().await.unwrap_or_default()
                    );
                    Err(PortalAPIError::Unknown)
                }
            }
            Err(e) => {
                error!("{:?}", e);
                Err(PortalAPIError::Unknown)
            }
        }
    }

    /// Benefits mapped into typed records, in the order received
    pub async fn device_benefit_records(&mut self) -> Result<Vec<DeviceBenefit>, PortalAPIError> {
        Ok(self
            .device_benefits()
            .await?
            .iter()
            .map(DeviceBenefit::from_raw)
            .collect())
    }
}

fn parse_benefits(body: Value) -> Result<Vec<Map<String, Value>>, PortalAPIError> {
    let result_code = body.get("resultCode").and_then(Value::as_i64).unwrap_or(0);
    if result_code != 0 {
        let message = body
            .get("userString")
            .or_else(|| body.get("resultString"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown portal error")
            .to_string();
        error!("{}", message);
        return Err(PortalAPIError::APIError(message));
    }
    let entries = match body {
        Value::Object(mut map) => map.remove("deviceBenefits"),
        _ => None,
    };
    let entries = match entries {
        Some(Value::Array(entries)) => entries,
        _ => {
            debug!("No deviceBenefits in response");
            return Ok(Vec::new());
        }
    };
    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Object(map) => result.push(map),
            other => warn!("Skipping device benefit entry: {}", other),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::device_benefit::DeviceClass;
    use crate::api::types::session::Session;
    use mockito::Matcher;
    use url::Url;

    const PATH: &str = "/account/ios/device/listDeviceBenefits.action";

    fn test_api(server_url: &str) -> PortalAPI {
        let mut session = Session::new();
        session.base_url = Some(Url::parse(&format!("{}/", server_url)).unwrap());
        session.team_id = Some("TEAM42".to_string());
        session.set_cookie(Some("secret".to_string()));
        PortalAPI::new(session).unwrap()
    }

    #[tokio::test]
    async fn lists_benefits_in_order() -> Result<(), PortalAPIError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("cookie", "myacinfo=secret")
            .match_body(Matcher::UrlEncoded("teamId".into(), "TEAM42".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"resultCode":0,"deviceBenefits":[
                    {"benefitId":"1","deviceClassEnum":"IPHONE","platform":"ios","maxQuantity":100,"availableQuantity":30},
                    {"benefitId":"2","deviceClassEnum":"AppleTV","platform":"ios","maxQuantity":100,"availableQuantity":100}
                ]}"#,
            )
            .create_async()
            .await;

        let mut api = test_api(&server.url());
        let benefits = api.device_benefit_records().await?;

        mock.assert_async().await;
        assert_eq!(benefits.len(), 2);
        assert_eq!(benefits[0].id, "1");
        assert_eq!(benefits[0].available, 30);
        assert_eq!(benefits[1].device_class, DeviceClass::AppleTv);
        Ok(())
    }

    #[tokio::test]
    async fn stores_rotated_csrf_tokens() -> Result<(), PortalAPIError> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_header("csrf", "new-token")
            .with_header("csrf_ts", "1700000000")
            .with_body(r#"{"resultCode":0,"deviceBenefits":[]}"#)
            .create_async()
            .await;

        let mut api = test_api(&server.url());
        let raw = api.device_benefits().await?;

        assert!(raw.is_empty());
        assert_eq!(
            api.session.csrf(),
            (
                Some("new-token".to_string()),
                Some("1700000000".to_string())
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn sends_csrf_headers() -> Result<(), PortalAPIError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("csrf", "token")
            .match_header("csrf_ts", "123")
            .with_status(200)
            .with_body(r#"{"resultCode":0}"#)
            .create_async()
            .await;

        let mut api = test_api(&server.url());
        api.session
            .set_csrf(Some("token".to_string()), Some("123".to_string()));
        let raw = api.device_benefits().await?;

        mock.assert_async().await;
        assert!(raw.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn result_code_becomes_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"resultCode":1100,"resultString":"Your session has expired.","userString":"Please sign in again."}"#)
            .create_async()
            .await;

        let mut api = test_api(&server.url());
        assert_eq!(
            api.device_benefits().await,
            Err(PortalAPIError::APIError("Please sign in again.".to_string()))
        );
    }

    #[tokio::test]
    async fn maps_status_codes() {
        let mut server = mockito::Server::new_async().await;
        let mut api = test_api(&server.url());

        let forbidden = server
            .mock("POST", PATH)
            .with_status(403)
            .create_async()
            .await;
        assert_eq!(
            api.device_benefits().await,
            Err(PortalAPIError::InvalidCredentials)
        );
        forbidden.remove_async().await;

        let unavailable = server
            .mock("POST", PATH)
            .with_status(503)
            .create_async()
            .await;
        assert_eq!(api.device_benefits().await, Err(PortalAPIError::Server));
        unavailable.remove_async().await;

        let _mock = server
            .mock("POST", PATH)
            .with_status(404)
            .with_body("not here")
            .create_async()
            .await;
        assert_eq!(api.device_benefits().await, Err(PortalAPIError::Unknown));
    }

    #[tokio::test]
    async fn invalid_json_is_unknown() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let mut api = test_api(&server.url());
        assert_eq!(api.device_benefits().await, Err(PortalAPIError::Unknown));
    }

    #[tokio::test]
    async fn missing_session_fails_before_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", PATH).expect(0).create_async().await;

        let mut api = test_api(&server.url());
        api.session.team_id = None;
        assert_eq!(
            api.device_benefits().await,
            Err(PortalAPIError::InvalidParams)
        );

        let mut api = test_api(&server.url());
        api.session.set_cookie(None);
        assert_eq!(
            api.device_benefits().await,
            Err(PortalAPIError::InvalidCredentials)
        );

        mock.assert_async().await;
    }

    #[test]
    fn skips_non_object_entries() {
        let body = serde_json::json!({
            "deviceBenefits": [{"benefitId": "1"}, 5, "x"]
        });
        let raw = parse_benefits(body).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["benefitId"], "1");
    }
}

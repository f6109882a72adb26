//! Session-based client for the APIC REST API.
//!
//! The APIC authenticates with a cookie token: one `aaaLogin` exchange
//! yields a session token that rides every later request as the
//! `APIC-cookie` cookie. [`ApicSession`] is the only handle that can issue
//! authenticated reads; it is created by [`ApicClient::login`] once per
//! report run and never re-authenticates per request.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApicConfig;
use crate::domain::types::{ControllerHealthEntry, FabricNode, FaultRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApicError {
    #[error("building HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("authentication rejected by {url} ({status})")]
    AuthRejected { url: String, status: StatusCode },

    #[error("login response from {url} carried no session token")]
    MissingToken { url: String },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("parsing response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Unauthenticated connection settings. Consumed by [`ApicClient::login`].
pub struct ApicClient {
    base_url: String,
    http: Client,
}

impl ApicClient {
    pub fn new(config: &ApicConfig) -> Result<Self, ApicError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(ApicError::Client)?;
        Ok(Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Single login exchange against `aaaLogin`. No retry, no refresh; a
    /// rejected or unreachable controller surfaces as an error the caller
    /// reports once.
    pub async fn login(
        self,
        username: &str,
        password: &str,
    ) -> Result<ApicSession, ApicError> {
        let url = format!("{}/api/aaaLogin.json", self.base_url);
        let body = LoginRequest {
            aaa_user: AaaUser {
                attributes: Credentials {
                    name: username,
                    pwd: password,
                },
            },
        };

        debug!(%url, user = username, "logging in");
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| ApicError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApicError::AuthRejected { url, status });
        }

        let login: ClassResponse<LoginObject> =
            resp.json().await.map_err(|source| ApicError::Decode {
                url: url.clone(),
                source,
            })?;

        let token = login
            .imdata
            .into_iter()
            .next()
            .map(|obj| obj.aaa_login.attributes.token)
            .ok_or(ApicError::MissingToken { url })?;

        Ok(ApicSession {
            base_url: self.base_url,
            http: self.http,
            username: username.to_string(),
            token,
        })
    }
}

/// An authenticated session. Exclusively owned by the run; dropping it
/// releases the underlying connection pool.
pub struct ApicSession {
    base_url: String,
    http: Client,
    username: String,
    token: String,
}

impl ApicSession {
    /// All currently raised fault instances.
    pub async fn faults(&self) -> Result<Vec<FaultRecord>, ApicError> {
        let objects: Vec<FaultObject> = self.get_class("faultInst").await?;
        Ok(objects
            .into_iter()
            .map(|obj| {
                let attr = obj.fault_inst.attributes;
                FaultRecord {
                    severity: attr.severity.into(),
                    description: attr.descr,
                }
            })
            .collect())
    }

    /// Registered fabric nodes: controllers, spines, leaves.
    pub async fn fabric_nodes(&self) -> Result<Vec<FabricNode>, ApicError> {
        let objects: Vec<FabricNodeObject> = self.get_class("fabricNode").await?;
        Ok(objects
            .into_iter()
            .map(|obj| {
                let attr = obj.fabric_node.attributes;
                FabricNode {
                    name: attr.name,
                    role: attr.role.into(),
                    fabric_state: attr.fabric_st,
                }
            })
            .collect())
    }

    /// Controller health side table, one row per cluster member.
    pub async fn controller_health(
        &self,
    ) -> Result<Vec<ControllerHealthEntry>, ApicError> {
        let objects: Vec<WiNodeObject> = self.get_class("infraWiNode").await?;
        Ok(objects
            .into_iter()
            .map(|obj| {
                let attr = obj.wi_node.attributes;
                ControllerHealthEntry {
                    node_name: attr.node_name,
                    health: attr.health,
                }
            })
            .collect())
    }

    /// Best-effort session teardown. The report is already complete when
    /// this runs, so failures are logged and swallowed.
    pub async fn logout(self) {
        let url = format!("{}/api/aaaLogout.json", self.base_url);
        let body =
            serde_json::json!({ "aaaUser": { "attributes": { "name": self.username } } });
        let result = self
            .http
            .post(&url)
            .header(header::COOKIE, self.cookie())
            .json(&body)
            .send()
            .await;
        match result {
            Ok(resp) => debug!(%url, status = %resp.status(), "logged out"),
            Err(err) => debug!(%url, error = %err, "logout failed, ignoring"),
        }
    }

    // ── Internal helpers ───────────────────────────────────

    fn cookie(&self) -> String {
        format!("APIC-cookie={}", self.token)
    }

    async fn get_class<T: DeserializeOwned>(
        &self,
        class: &str,
    ) -> Result<Vec<T>, ApicError> {
        let url = format!("{}/api/class/{}.json", self.base_url, class);
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .header(header::COOKIE, self.cookie())
            .send()
            .await
            .map_err(|source| ApicError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApicError::Status { url, status });
        }

        let body: ClassResponse<T> =
            resp.json().await.map_err(|source| ApicError::Decode {
                url: url.clone(),
                source,
            })?;
        Ok(body.imdata)
    }
}

// ── APIC wire format ───────────────────────────────────────

/// Response envelope shared by every class read:
/// `{ "imdata": [ { "<class>": { "attributes": { ... } } } ] }`.
#[derive(Debug, Deserialize)]
struct ClassResponse<T> {
    #[serde(default = "Vec::new")]
    imdata: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Attributed<T> {
    attributes: T,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "aaaUser")]
    aaa_user: AaaUser<'a>,
}

#[derive(Debug, Serialize)]
struct AaaUser<'a> {
    attributes: Credentials<'a>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    name: &'a str,
    pwd: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginObject {
    #[serde(rename = "aaaLogin")]
    aaa_login: Attributed<TokenAttributes>,
}

#[derive(Debug, Deserialize)]
struct TokenAttributes {
    token: String,
}

#[derive(Debug, Deserialize)]
struct FaultObject {
    #[serde(rename = "faultInst")]
    fault_inst: Attributed<FaultAttributes>,
}

#[derive(Debug, Deserialize)]
struct FaultAttributes {
    #[serde(default)]
    severity: String,
    #[serde(default)]
    descr: String,
}

#[derive(Debug, Deserialize)]
struct FabricNodeObject {
    #[serde(rename = "fabricNode")]
    fabric_node: Attributed<FabricNodeAttributes>,
}

#[derive(Debug, Deserialize)]
struct FabricNodeAttributes {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
    #[serde(rename = "fabricSt")]
    fabric_st: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WiNodeObject {
    #[serde(rename = "infraWiNode")]
    wi_node: Attributed<WiNodeAttributes>,
}

#[derive(Debug, Deserialize)]
struct WiNodeAttributes {
    #[serde(rename = "nodeName", default)]
    node_name: String,
    #[serde(default)]
    health: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::{NodeRole, Severity};

    #[test]
    fn login_request_matches_the_aaa_shape() {
        let body = LoginRequest {
            aaa_user: AaaUser {
                attributes: Credentials {
                    name: "admin",
                    pwd: "secret",
                },
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({ "aaaUser": { "attributes": { "name": "admin", "pwd": "secret" } } })
        );
    }

    #[test]
    fn login_response_yields_the_session_token() {
        let raw = json!({
            "totalCount": "1",
            "imdata": [
                { "aaaLogin": { "attributes": { "token": "abc123", "refreshTimeoutSeconds": "600" } } }
            ]
        });
        let parsed: ClassResponse<LoginObject> = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.imdata[0].aaa_login.attributes.token, "abc123");
    }

    #[test]
    fn fault_envelope_tolerates_missing_fields() {
        let raw = json!({
            "totalCount": "2",
            "imdata": [
                { "faultInst": { "attributes": { "severity": "critical", "descr": "link down" } } },
                { "faultInst": { "attributes": {} } }
            ]
        });
        let parsed: ClassResponse<FaultObject> = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.imdata.len(), 2);

        let attr = &parsed.imdata[1].fault_inst.attributes;
        assert_eq!(attr.severity, "");
        assert_eq!(attr.descr, "");
        // An empty severity resolves to Other, never to a tier.
        assert_eq!(
            Severity::from(attr.severity.clone()),
            Severity::Other(String::new())
        );
    }

    #[test]
    fn fabric_node_without_state_parses_to_none() {
        let raw = json!({
            "imdata": [
                { "fabricNode": { "attributes": { "name": "apic1", "role": "controller" } } },
                { "fabricNode": { "attributes": { "name": "leaf1", "role": "leaf", "fabricSt": "active" } } }
            ]
        });
        let parsed: ClassResponse<FabricNodeObject> = serde_json::from_value(raw).unwrap();

        let ctrl = &parsed.imdata[0].fabric_node.attributes;
        assert_eq!(ctrl.fabric_st, None);
        assert_eq!(NodeRole::from(ctrl.role.clone()), NodeRole::Controller);

        let leaf = &parsed.imdata[1].fabric_node.attributes;
        assert_eq!(leaf.fabric_st.as_deref(), Some("active"));
    }

    #[test]
    fn controller_health_rows_parse_by_node_name() {
        let raw = json!({
            "imdata": [
                { "infraWiNode": { "attributes": { "nodeName": "apic1", "health": "fully-fit" } } }
            ]
        });
        let parsed: ClassResponse<WiNodeObject> = serde_json::from_value(raw).unwrap();
        let attr = &parsed.imdata[0].wi_node.attributes;
        assert_eq!(attr.node_name, "apic1");
        assert_eq!(attr.health, "fully-fit");
    }

    #[test]
    fn empty_body_decodes_to_no_records() {
        let parsed: ClassResponse<FaultObject> = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.imdata.is_empty());
    }
}

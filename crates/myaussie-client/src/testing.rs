//! In-process fake of the MyAussie auth and API hosts for tests

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::transport::{Endpoints, Transport};

#[derive(Default)]
struct Counters {
    logins: AtomicUsize,
    refreshes: AtomicUsize,
}

/// Handle to a running fake server.
pub struct FakeMyAussie {
    base: String,
    counters: Arc<Counters>,
}

impl FakeMyAussie {
    pub const PASSWORD: &'static str = "hunter2";
    /// Logs in without being issued a refresh token
    pub const LEGACY_USER: &'static str = "legacy@example.com";
    pub const REVOKED_REFRESH_TOKEN: &'static str = "rt-revoked";
    pub const REVOKED_COOKIE: &'static str = "ck-revoked";
    pub const EXPIRES_IN_SECS: u64 = 7 * 24 * 60 * 60;
    pub const SERVICE_ID: i64 = 12345;
    /// Usage for this service comes back as a truncated 200 body
    pub const MALFORMED_SERVICE_ID: i64 = 666;

    pub async fn start() -> Self {
        let counters = Arc::new(Counters::default());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/login", post(login).put(refresh))
            .route("/customer", get(customer))
            .route("/broadband/{id}/usage", get(usage))
            .route("/billing/transactions", get(transactions))
            .route("/nbn/{id}/outages", get(outages))
            .route("/tests/{id}", get(service_tests))
            .route("/echo", any(echo))
            .route("/status/{code}", get(status))
            .route("/malformed", get(malformed))
            .with_state(counters.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            counters,
        }
    }

    pub fn transport(&self) -> Transport {
        transport_for(&self.base)
    }

    pub fn logins(&self) -> usize {
        self.counters.logins.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.counters.refreshes.load(Ordering::SeqCst)
    }
}

/// Transport aimed at `base` for both hosts.
pub fn transport_for(base: &str) -> Transport {
    Transport::with_endpoints(Endpoints::single(base)).unwrap()
}

/// Absolute expiry `millis` from now.
pub fn expiring_in(millis: u64) -> u64 {
    myaussie_auth::now_millis() + millis
}

fn session_granted(cookie: String, body: Value) -> Response {
    (
        [(SET_COOKIE, format!("myaussie_cookie={cookie}; Path=/; HttpOnly"))],
        Json(body),
    )
        .into_response()
}

async fn login(
    State(counters): State<Arc<Counters>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    counters.logins.fetch_add(1, Ordering::SeqCst);
    let username = form.get("username").map(String::as_str).unwrap_or("");
    let password = form.get("password").map(String::as_str).unwrap_or("");

    if password != FakeMyAussie::PASSWORD {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match username {
        "me@example.com" => session_granted(
            "ck-login".into(),
            json!({"refreshToken": "rt-login", "expiresIn": FakeMyAussie::EXPIRES_IN_SECS}),
        ),
        FakeMyAussie::LEGACY_USER => session_granted(
            "ck-legacy".into(),
            json!({"expiresIn": FakeMyAussie::EXPIRES_IN_SECS}),
        ),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn refresh(State(counters): State<Arc<Counters>>, Json(body): Json<Value>) -> Response {
    let n = counters.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
    // Widen the window for concurrent callers
    tokio::time::sleep(Duration::from_millis(50)).await;

    match body["refreshToken"].as_str() {
        None | Some("") | Some(FakeMyAussie::REVOKED_REFRESH_TOKEN) => {
            StatusCode::UNAUTHORIZED.into_response()
        }
        Some(_) => session_granted(
            format!("ck-refresh-{n}"),
            json!({"refreshToken": format!("rt-refresh-{n}"), "expiresIn": FakeMyAussie::EXPIRES_IN_SECS}),
        ),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| c.strip_prefix("myaussie_cookie="))
        .is_some_and(|v| v.starts_with("ck-") && v != FakeMyAussie::REVOKED_COOKIE)
}

fn service_resource(headers: &HeaderMap, id: i64, body: fn() -> Value) -> Response {
    if !authorized(headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != FakeMyAussie::SERVICE_ID {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(body()).into_response()
}

async fn customer(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(customer_json()).into_response()
}

async fn usage(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if id == FakeMyAussie::MALFORMED_SERVICE_ID && authorized(&headers) {
        return (StatusCode::OK, r#"{"usedMb": 51"#).into_response();
    }
    service_resource(&headers, id, usage_json)
}

async fn transactions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(transactions_json()).into_response()
}

async fn outages(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    service_resource(&headers, id, outages_json)
}

async fn service_tests(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    service_resource(&headers, id, tests_json)
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };
    Json(json!({
        "method": method.as_str(),
        "cookie": header(COOKIE),
        "content_type": header(CONTENT_TYPE),
        "body": body,
    }))
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, r#"{"error":"details are never parsed"}"#).into_response()
}

async fn malformed() -> Response {
    (StatusCode::OK, "<html>maintenance</html>").into_response()
}

pub fn customer_json() -> Value {
    json!({
        "customer_number": 1234567,
        "billing_name": "Jane Citizen",
        "billformat": 1,
        "brand": "Aussie Broadband",
        "postalAddress": {
            "address": "1 Example St",
            "town": "Brunswick",
            "state": "VIC",
            "postcode": "3056"
        },
        "communicationPreferences": {
            "outages": {"sms": false, "sms247": false, "email": true}
        },
        "phone": "0400000000",
        "email": ["jane@example.com"],
        "payment_method": "creditcard",
        "isSuspended": false,
        "accountBalanceCents": 0,
        "services": {
            "NBN": [{
                "service_id": FakeMyAussie::SERVICE_ID,
                "type": "NBN",
                "name": "NBN",
                "plan": "NBN 100/40",
                "description": "NBN: 1 Example St, Brunswick",
                "nbnDetails": {
                    "product": "FTTP",
                    "poiName": "Brunswick",
                    "cvcGraph": "https://example.com/cvc.png",
                    "speedPotential": {
                        "downloadMbps": 97,
                        "uploadMbps": 38,
                        "lastTested": "2026-09-30T12:00:00+10:00"
                    }
                },
                "nextBillDate": "2026-11-01T00:00:00+11:00",
                "openDate": "2024-01-15",
                "usageAnniversary": 1,
                "ipAddresses": ["203.0.113.10"],
                "address": {
                    "subaddresstype": null,
                    "subaddressnumber": null,
                    "streetnumber": "1",
                    "streetname": "Example",
                    "streettype": "St",
                    "locality": "Brunswick",
                    "postcode": "3056",
                    "state": "VIC"
                },
                "contract": {
                    "service_id": FakeMyAussie::SERVICE_ID,
                    "contract_start": "2024-01-15",
                    "contract_length": 12,
                    "contract_version": "v3"
                }
            }]
        },
        "permissions": {
            "createPaymentPlan": true,
            "updatePaymentDetails": true,
            "createContact": true,
            "updateContacts": true,
            "updateCustomer": true,
            "changePassword": true,
            "createTickets": true,
            "makePayment": true,
            "purchaseDatablocksNextBill": false,
            "createOrder": true,
            "viewOrders": true
        },
        "creditCard": {"nameOnCard": "J CITIZEN", "number": "XXXX-1234", "expiry": "12/28"}
    })
}

pub fn usage_json() -> Value {
    json!({
        "usedMb": 51200,
        "downloadedMb": 48000,
        "uploadedMb": 3200,
        "remainingMb": null,
        "daysTotal": 31,
        "daysRemaining": 13,
        "lastUpdated": "2026-10-18 09:00:00"
    })
}

pub fn transactions_json() -> Value {
    json!([
        {
            "id": 9001,
            "type": "payment",
            "time": "2026-10-01",
            "description": "Credit card payment",
            "amountCents": -8900,
            "balanceCents": 0,
            "runningBalanceCents": 0
        },
        {
            "id": 9000,
            "type": "invoice",
            "time": "2026-10-01",
            "description": "NBN 100/40 monthly",
            "amountCents": 8900,
            "balanceCents": 8900,
            "runningBalanceCents": 8900
        }
    ])
}

pub fn outages_json() -> Value {
    json!({
        "currentNbnOutages": [
            {"created": "2026-10-18 07:00:00", "status": "Investigating", "updated_at": "2026-10-18 08:00:00"}
        ],
        "scheduledNbnOutages": [
            {"start_date": "2026-10-20 00:00:00", "end_date": "2026-10-20 04:00:00", "duration": "4"}
        ],
        "networkEvents": [{"title": "Fibre cut", "reference": 42}],
        "aussieOutages": []
    })
}

pub fn tests_json() -> Value {
    json!([
        {
            "id": 1,
            "type": "linestate",
            "status": "completed",
            "result": "Pass",
            "created_at": "2026-10-01 10:00:00",
            "updated_at": "2026-10-01 10:01:30",
            "completed_at": "2026-10-01 10:01:30"
        },
        {
            "id": 2,
            "type": "ntdstatus",
            "status": "running",
            "result": null,
            "created_at": "2026-10-18 09:00:00",
            "updated_at": null,
            "completed_at": null
        }
    ])
}

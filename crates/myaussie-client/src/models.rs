//! Response models for MyAussie API resources
//!
//! Plain records, no behavior. Fields the API omits or nulls for some
//! accounts are `Option` or `#[serde(default)]`; everything else is
//! required and a missing or mistyped value is a decode error.

use serde::{Deserialize, Serialize};

/// `GET /customer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(rename = "customer_number")]
    pub customer_number: i64,
    #[serde(rename = "billing_name")]
    pub billing_name: String,
    #[serde(rename = "billformat")]
    pub bill_format: i64,
    pub brand: String,
    pub postal_address: PostalAddress,
    #[serde(default)]
    pub communication_preferences: CommunicationPreferences,
    pub phone: String,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(rename = "payment_method")]
    pub payment_method: String,
    pub is_suspended: bool,
    pub account_balance_cents: i64,
    #[serde(default)]
    pub services: Services,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub credit_card: Option<CreditCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub address: String,
    pub town: String,
    pub state: String,
    pub postcode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationPreferences {
    #[serde(default)]
    pub outages: OutageNotifications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutageNotifications {
    pub sms: bool,
    pub sms247: bool,
    pub email: bool,
}

/// Services on the account, grouped by technology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Services {
    #[serde(rename = "NBN", default)]
    pub nbn: Vec<NbnService>,
}

/// What the customer's login may do in the portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Permissions {
    pub create_payment_plan: bool,
    pub update_payment_details: bool,
    pub create_contact: bool,
    pub update_contacts: bool,
    pub update_customer: bool,
    pub change_password: bool,
    pub create_tickets: bool,
    pub make_payment: bool,
    pub purchase_datablocks_next_bill: bool,
    pub create_order: bool,
    pub view_orders: bool,
}

/// Masked card on file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub name_on_card: String,
    pub number: String,
    pub expiry: String,
}

/// One NBN broadband service, embedded in `CustomerDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NbnService {
    #[serde(rename = "service_id")]
    pub service_id: i64,
    #[serde(rename = "type")]
    pub service_type: String,
    pub name: String,
    pub plan: String,
    #[serde(default)]
    pub description: String,
    pub nbn_details: NbnDetails,
    /// RFC 3339 timestamp, as sent
    #[serde(default)]
    pub next_bill_date: Option<String>,
    #[serde(default)]
    pub open_date: Option<String>,
    pub usage_anniversary: i64,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    pub address: ServiceAddress,
    #[serde(default)]
    pub contract: Option<Contract>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NbnDetails {
    pub product: String,
    pub poi_name: String,
    #[serde(default)]
    pub cvc_graph: Option<String>,
    /// Absent until the line has been speed-tested
    #[serde(default)]
    pub speed_potential: Option<SpeedPotential>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedPotential {
    pub download_mbps: i64,
    pub upload_mbps: i64,
    pub last_tested: String,
}

/// Service address, in the API's lowercase field naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAddress {
    pub subaddresstype: Option<String>,
    pub subaddressnumber: Option<String>,
    pub streetnumber: String,
    pub streetname: String,
    pub streettype: String,
    pub locality: String,
    pub postcode: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub service_id: i64,
    pub contract_start: String,
    pub contract_length: i64,
    pub contract_version: String,
}

/// `GET /broadband/{serviceId}/usage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInformation {
    pub used_mb: i64,
    pub downloaded_mb: i64,
    pub uploaded_mb: i64,
    /// `None` on unlimited plans
    #[serde(default)]
    pub remaining_mb: Option<i64>,
    pub days_total: i64,
    pub days_remaining: i64,
    pub last_updated: String,
}

/// `GET /nbn/{serviceId}/outages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutagesNbn {
    #[serde(default)]
    pub current_nbn_outages: Vec<CurrentOutage>,
    #[serde(default)]
    pub scheduled_nbn_outages: Vec<ScheduledOutage>,
    /// Free-form; shape varies by event type
    #[serde(default)]
    pub network_events: Vec<serde_json::Value>,
    #[serde(default)]
    pub aussie_outages: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentOutage {
    pub created: String,
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOutage {
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
}

/// One entry of `GET /tests/{serviceId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: i64,
    #[serde(rename = "type")]
    pub test_type: String,
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// `None` while the test is still running
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// One entry of `GET /billing/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    #[serde(rename = "type")]
    pub payment_type: String,
    pub time: String,
    pub description: String,
    pub amount_cents: i64,
    pub balance_cents: i64,
    pub running_balance_cents: i64,
}

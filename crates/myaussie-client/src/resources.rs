//! Resource descriptors and accessors
//!
//! Each remote resource is a `Resource<T>`: verb, path template, path
//! params and the model its body decodes into. Service IDs are passed
//! through unvalidated; the server owns that check and answers bad IDs
//! with a non-200 status.

use std::marker::PhantomData;

use reqwest::Method;

use crate::error::Result;
use crate::models::{CustomerDetails, OutagesNbn, Payment, Test, UsageInformation};
use crate::session::Session;

/// Declarative description of one API resource.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    pub method: Method,
    pub path_template: &'static str,
    pub params: Vec<(&'static str, String)>,
    shape: PhantomData<fn() -> T>,
}

impl<T> Resource<T> {
    pub fn get(path_template: &'static str) -> Self {
        Self {
            method: Method::GET,
            path_template,
            params: Vec::new(),
            shape: PhantomData,
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// Path with params substituted.
    pub fn path(&self) -> String {
        crate::executor::expand_path(self.path_template, &self.params)
    }
}

/// `GET /customer`: account, services and permissions.
pub fn customer_details() -> Resource<CustomerDetails> {
    Resource::get("/customer")
}

/// `GET /broadband/{serviceId}/usage`: usage for the current period.
pub fn usage(service_id: i64) -> Resource<UsageInformation> {
    Resource::get("/broadband/{serviceId}/usage").with_param("serviceId", service_id)
}

/// `GET /billing/transactions`: billing history.
pub fn transactions() -> Resource<Vec<Payment>> {
    Resource::get("/billing/transactions")
}

/// `GET /nbn/{serviceId}/outages`: current and scheduled NBN outages.
pub fn nbn_outages(service_id: i64) -> Resource<OutagesNbn> {
    Resource::get("/nbn/{serviceId}/outages").with_param("serviceId", service_id)
}

/// `GET /tests/{serviceId}`: diagnostic tests run on a service.
pub fn tests(service_id: i64) -> Resource<Vec<Test>> {
    Resource::get("/tests/{serviceId}").with_param("serviceId", service_id)
}

impl Session {
    pub async fn customer_details(&self) -> Result<CustomerDetails> {
        self.fetch(&customer_details()).await
    }

    pub async fn usage(&self, service_id: i64) -> Result<UsageInformation> {
        self.fetch(&usage(service_id)).await
    }

    pub async fn transactions(&self) -> Result<Vec<Payment>> {
        self.fetch(&transactions()).await
    }

    pub async fn nbn_outages(&self, service_id: i64) -> Result<OutagesNbn> {
        self.fetch(&nbn_outages(service_id)).await
    }

    pub async fn tests(&self, service_id: i64) -> Result<Vec<Test>> {
        self.fetch(&tests(service_id)).await
    }
}

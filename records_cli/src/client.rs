//! Blocking HTTP client for the records API.
//!
//! Non-2xx responses become errors carrying the server's `{error}` message.

use anyhow::{bail, Context, Result};
use records_core::{Career, CareerDraft, Category, CategoryDraft, Student, StudentDraft};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

#[derive(Deserialize)]
struct MessageReply {
    message: String,
}

pub struct ApiClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, failure: &str) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .with_context(|| format!("{}: could not reach {}", failure, self.base_url))?;

        let status = response.status();
        log::debug!("[client] {} -> HTTP {}", response.url(), status);
        if status.is_success() {
            return response
                .json()
                .with_context(|| format!("{}: unexpected response body", failure));
        }

        match response.json::<ErrorReply>() {
            Ok(reply) => bail!(reply.error),
            Err(_) => bail!("{} (HTTP {})", failure, status),
        }
    }

    fn delete(&self, path: &str, failure: &str) -> Result<String> {
        let reply: MessageReply = self.send(self.http.delete(self.url(path)), failure)?;
        Ok(reply.message)
    }

    // ============================================================
    // CATEGORIES
    // ============================================================

    pub fn create_category(&self, draft: &CategoryDraft) -> Result<Category> {
        let request = self.http.post(self.url("categories")).json(draft);
        self.send(request, "Failed to create category")
    }

    pub fn get_category(&self, id: u64) -> Result<Category> {
        let request = self.http.get(self.url(&format!("categories/{}", id)));
        self.send(request, "Category not found")
    }

    pub fn delete_category(&self, id: u64) -> Result<String> {
        self.delete(&format!("categories/{}", id), "Failed to delete category")
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.send(self.http.get(self.url("categories")), "Failed to list categories")
    }

    // ============================================================
    // CAREERS
    // ============================================================

    pub fn create_career(&self, draft: &CareerDraft) -> Result<Career> {
        let request = self.http.post(self.url("careers")).json(draft);
        self.send(request, "Failed to create career")
    }

    pub fn get_career(&self, id: u64) -> Result<Career> {
        let request = self.http.get(self.url(&format!("careers/{}", id)));
        self.send(request, "Career not found")
    }

    pub fn delete_career(&self, id: u64) -> Result<String> {
        self.delete(&format!("careers/{}", id), "Failed to delete career")
    }

    pub fn list_careers(&self) -> Result<Vec<Career>> {
        self.send(self.http.get(self.url("careers")), "Failed to list careers")
    }

    // ============================================================
    // STUDENTS
    // ============================================================

    pub fn create_student(&self, draft: &StudentDraft) -> Result<Student> {
        let request = self.http.post(self.url("students")).json(draft);
        self.send(request, "Failed to create student")
    }

    pub fn get_student(&self, id: u64) -> Result<Student> {
        let request = self.http.get(self.url(&format!("students/{}", id)));
        self.send(request, "Student not found")
    }

    pub fn delete_student(&self, id: u64) -> Result<String> {
        self.delete(&format!("students/{}", id), "Failed to delete student")
    }

    pub fn students_by_career(&self, career: &str) -> Result<Vec<Student>> {
        let request = self
            .http
            .get(self.url("students"))
            .query(&[("career", career)]);
        self.send(request, "Failed to filter students")
    }
}

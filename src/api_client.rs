use anyhow::Result;
use reqwest::{
    blocking::{Client, Response},
    header,
};
use serde::Serialize;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            client: ApiClient::build_client(token)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn get(&self, path: &str) -> reqwest::Result<Response> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        log::debug!("GET {} -> {}", path, response.status());
        Ok(response)
    }

    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<Response> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send()?;
        log::debug!("POST {} -> {}", path, response.status());
        Ok(response)
    }

    fn build_client(token: &str) -> Result<Client> {
        let mut headers = header::HeaderMap::new();
        let mut auth_value = header::HeaderValue::from_str(&format!("token {}", token))?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_V3));

        Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(None)
            .build()
            .map_err(Into::into)
    }
}

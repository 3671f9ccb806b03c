use crate::{
    api_client::ApiClient,
    error::{Error, Result},
};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid { login: Option<String> },
    /// The identity endpoint answered with something other than 200 or 401.
    Unverified { status: StatusCode },
}

#[derive(Deserialize, Debug)]
struct UserResponse {
    login: Option<String>,
}

/// Confirms the credential against the `/user` endpoint.
///
/// Only a 401 is fatal; other unexpected statuses are reported as
/// [`TokenStatus::Unverified`] so the caller can warn and carry on.
pub fn check_token(client: &ApiClient) -> Result<TokenStatus> {
    let response = client.get("user")?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(Error::InvalidCredential),
        StatusCode::OK => {
            let user = response.json::<UserResponse>()?;
            log::info!("token authenticated as {:?}", user.login);
            Ok(TokenStatus::Valid { login: user.login })
        }
        status => Ok(TokenStatus::Unverified { status }),
    }
}

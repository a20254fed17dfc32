// User account endpoints.

use secrecy::{ExposeSecret, SecretString};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{PasswordChangeRequest, ProfileUpdateRequest, RoleChangeRequest, UserDto};

impl ApiClient {
    /// `PATCH /users/profile/{id}` -- update name and/or email.
    pub async fn update_profile(
        &self,
        id: &str,
        input: &ProfileUpdateRequest,
    ) -> Result<UserDto, Error> {
        self.patch(&format!("users/profile/{id}"), input).await
    }

    /// `PATCH /users/change-password/{id}` -- rotate the password.
    /// Neither password is retained after the request completes.
    pub async fn change_password(
        &self,
        id: &str,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        let body = PasswordChangeRequest {
            old_password: old_password.expose_secret(),
            new_password: new_password.expose_secret(),
        };
        self.patch_empty(&format!("users/change-password/{id}"), &body)
            .await
    }

    /// `PATCH /users/change-role/{id}` -- set the role tag.
    pub async fn change_role(&self, id: &str, role: &str) -> Result<(), Error> {
        let body = RoleChangeRequest { role };
        self.patch_empty(&format!("users/change-role/{id}"), &body)
            .await
    }

    /// `DELETE /users/{id}` -- permanently delete the account.
    pub async fn delete_account(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("users/{id}")).await
    }
}

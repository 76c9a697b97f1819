//! `logout` - forget the stored session

use super::{finish, CommandContext};
use crate::adapters::api::AuthApi;
use clap::Args;

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {}

impl LogoutArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let result = AuthApi::new(context.client).logout().await.map(|()| {
            println!("👋 Signed out");
        });
        Ok(finish("Sign-out failed", result))
    }
}

//! `login` - start a session

use super::{finish, CommandContext};
use crate::adapters::api::AuthApi;
use crate::config::secret_string;
use crate::domain::LoginForm;
use clap::Args;
use std::io::{self, BufRead, Write};

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Congregation number
    #[arg(long, env = "FIELDSERVICE_CONGREGATION")]
    pub congregation: String,

    /// Account email
    #[arg(long, env = "FIELDSERVICE_EMAIL")]
    pub email: String,

    /// Password; read from stdin when omitted
    #[arg(long, env = "FIELDSERVICE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl LoginArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match CommandContext::load(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let password = match self.password {
            Some(ref password) => password.clone(),
            None => {
                print!("Password: ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                line.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        let form = LoginForm {
            congregation: self.congregation.clone(),
            email: self.email.clone(),
            password: secret_string(password),
        };

        let auth = AuthApi::new(context.client);
        let result = auth.login(&form).await.map(|response| {
            println!(
                "✅ Signed in as {} {} ({})",
                response.user.first_name, response.user.last_name, response.user.email
            );
            println!("   Congregation: {}", response.user.congregation_id);
        });

        Ok(finish("Sign-in failed", result))
    }
}

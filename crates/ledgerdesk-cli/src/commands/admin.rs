//! Administrator provisioning.

use anyhow::{Context, bail};
use clap::Args;

use ledgerdesk_auth::{PasswordHasher, PasswordValidator, generate_temporary_password};
use ledgerdesk_core::config::AppConfig;
use ledgerdesk_database::repositories::UserRepository;
use ledgerdesk_entity::user::{CreateUser, UserRole};

use crate::output;

/// Arguments for `create-admin`
#[derive(Debug, Args)]
pub struct CreateAdminArgs {
    /// Full name
    #[arg(short, long)]
    pub name: String,
    /// Login email
    #[arg(short, long)]
    pub email: String,
    /// Password; a temporary one is generated and printed when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Create the account, failing if the email is taken.
pub async fn execute(args: &CreateAdminArgs, config: &AppConfig) -> anyhow::Result<()> {
    let name = args.name.trim();
    let email = args.email.trim();
    if name.is_empty() {
        bail!("--name must not be empty");
    }
    if !email.contains('@') {
        bail!("--email must be an email address");
    }

    let (password, generated) = match &args.password {
        Some(password) => {
            PasswordValidator::new(&config.auth)
                .validate(password)
                .context("password rejected")?;
            (password.clone(), false)
        }
        None => (generate_temporary_password(), true),
    };
    let password_hash = PasswordHasher::new()
        .hash_password(&password)
        .context("hashing password")?;

    let pool = super::connect(config).await?;
    let users = UserRepository::new(pool.pool().clone());

    if users.find_by_email(email).await?.is_some() {
        bail!("a user with email {email} already exists");
    }

    let user = users
        .create(&CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash),
            role: UserRole::Admin,
            company: None,
            phone: None,
            created_by: None,
        })
        .await
        .context("creating admin")?;
    pool.close().await;

    output::print_success("Administrator created.");
    output::print_field("id", user.id);
    output::print_field("email", &user.email);
    if generated {
        output::print_field("temporary password", &password);
    }
    Ok(())
}

use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims, Role};
use crate::config::AppConfig;
use crate::middleware::XSRF_HEADER;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "Email of the caller")]
    pub email: String,

    #[arg(long, help = "Grant the ADMIN role in addition to USER")]
    pub admin: bool,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn roles_for(admin: bool) -> Vec<Role> {
    if admin {
        vec![Role::Admin, Role::User]
    } else {
        vec![Role::User]
    }
}

pub fn handle(args: TokenArgs, config: &AppConfig) -> anyhow::Result<()> {
    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(args.email, roles_for(args.admin), hours);
    let token = generate_jwt(&claims, &config.security.jwt_secret)?;

    let out = json!({
        "token": token,
        "xsrf": claims.xsrf,
        "xsrfHeader": XSRF_HEADER,
        "roles": claims.roles,
        "expires": claims.exp,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

use std::env;
fn main() {
    dotenvy::dotenv().ok();

    // Publishing is skipped at runtime when these are missing
    let optional_vars = ["DISCORD_WEBHOOK", "GOOGLE_SHEETS_ID", "GOOGLE_SHEETS_TOKEN"];

    for &var in &optional_vars {
        if env::var(var).map(|v| v.trim().is_empty()).unwrap_or(true) {
            println!("cargo:warning=Environment variable {} is not set.", var);
        }
    }

    println!("cargo:rerun-if-env-changed=LEAGUE_CONFIG");
    for &var in &optional_vars {
        println!("cargo:rerun-if-env-changed={}", var);
    }
}

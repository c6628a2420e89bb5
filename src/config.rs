use std::env;

/// Startup configuration. Credentials are required; the table list falls
/// back to the one production table when not overridden.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub donation_tables: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let supabase_url = env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let supabase_key = env::var("SUPABASE_KEY").expect("SUPABASE_KEY must be set");
        let donation_tables = env::var("DONATION_TABLES")
            .map(|raw| parse_table_list(&raw))
            .unwrap_or_else(|_| vec!["chiaa_gaming_donations".to_string()]);

        Config {
            supabase_url,
            supabase_key,
            donation_tables,
        }
    }
}

fn parse_table_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

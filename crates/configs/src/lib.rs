use anyhow::anyhow;
use anyhow::Result;
use models::range::CellRange;
use serde::Deserialize;

/// Everything the server needs, from `config.toml` plus environment overrides.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub sheets: SheetsConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    /// Directory served as static files from the service root.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8000, worker_threads: None, static_dir: "public".into() }
    }
}

/// Shared secrets, compared for exact equality.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_password: String,
    pub webhook_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { admin_password: "changeme".into(), webhook_secret: "secret".into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: "reservations.json".into() }
    }
}

/// One event day backed by its own sheet tab.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SheetDay {
    pub title: String,
    /// Sheet tab id; empty means not configured yet.
    #[serde(default)]
    pub gid: String,
    /// Narrow range on the status tab holding this day's category symbols.
    #[serde(default)]
    pub status_range: Option<CellRange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// Published CSV export; when empty the summary is read from the local store.
    pub csv_url: String,
    /// Tab holding the condensed status per day.
    pub status_gid: String,
    pub detail_range: CellRange,
    pub categories: Vec<String>,
    pub days: Vec<SheetDay>,
    pub request_timeout_secs: u64,
}

fn status(range: &str) -> Option<CellRange> {
    range.parse().ok()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: "1fwx7R-qcOMpSeHN24kIRfuiwPp1CzEeZRFLzR5YaGZk".into(),
            csv_url: String::new(),
            status_gid: "749666203".into(),
            detail_range: CellRange { start_row: 2, end_row: 19, start_col: 9, end_col: 18 },
            categories: ["全体", "地上テーブル", "地上カウンター", "地下テーブル"]
                .map(String::from)
                .to_vec(),
            days: vec![
                SheetDay { title: "11/21(金)".into(), gid: "825962963".into(), status_range: status("H4:H7") },
                SheetDay { title: "11/22(土)".into(), gid: "689251037".into(), status_range: status("H10:H13") },
                SheetDay { title: "11/23(日)".into(), gid: "721235396".into(), status_range: status("H16:H19") },
            ],
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Slide {
    pub image: String,
    pub caption: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub reload_interval_secs: u64,
    pub slide_interval_ms: u64,
    /// Viewport width at or below which cards stretch to full width.
    pub breakpoint_px: u32,
    pub reserve_form_url: String,
    pub slides: Vec<Slide>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "空席状況".into(),
            reload_interval_secs: 60,
            slide_interval_ms: 3000,
            breakpoint_px: 700,
            reserve_form_url: "https://forms.gle/VsKbDMhrxh1zmqjP9".into(),
            slides: vec![
                Slide {
                    image: "images/slide1.jpg".into(),
                    caption: "鉄板でじっくり焼き上げたバターコーン。アツアツをどうぞ！".into(),
                },
                Slide {
                    image: "images/slide2.jpg".into(),
                    caption: "新鮮な軍艦巻き。お寿司好きにはたまらない一品！".into(),
                },
            ],
        }
    }
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = config_path();
    if std::fs::metadata(&path).is_err() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment overrides: `HOST`, `PORT`, `TOKIO_WORKER_THREADS`,
    /// `STATIC_DIR`, `ADMIN_PASSWORD`, `WEBHOOK_SECRET`, `DATA_FILE`,
    /// `SHEET_CSV_URL`. Unparsable numbers are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = dir;
        }
        if let Some(pw) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = pw;
        }
        if let Some(secret) = lookup("WEBHOOK_SECRET") {
            self.auth.webhook_secret = secret;
        }
        if let Some(path) = lookup("DATA_FILE") {
            self.store.path = path;
        }
        if let Some(url) = lookup("SHEET_CSV_URL") {
            self.sheets.csv_url = url;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.auth.admin_password.is_empty() || self.auth.webhook_secret.is_empty() {
            return Err(anyhow!("auth.admin_password and auth.webhook_secret must not be empty"));
        }
        if self.store.path.trim().is_empty() {
            return Err(anyhow!("store.path must not be empty"));
        }
        if self.page.reload_interval_secs == 0 || self.page.slide_interval_ms == 0 {
            return Err(anyhow!("page intervals must be positive"));
        }
        if self.sheets.request_timeout_secs == 0 {
            self.sheets.request_timeout_secs = 10;
        }
        self.sheets.csv_url = self.sheets.csv_url.trim().to_string();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.auth.admin_password, "changeme");
        assert_eq!(cfg.auth.webhook_secret, "secret");
        assert_eq!(cfg.sheets.days.len(), 3);
        assert_eq!(cfg.sheets.days[1].status_range.unwrap().to_string(), "H10:H13");
        assert_eq!(cfg.page.reload_interval_secs, 60);
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [("PORT", "9001"), ("ADMIN_PASSWORD", "pw"), ("WEBHOOK_SECRET", "hook"), ("DATA_FILE", "/tmp/r.json")]
            .into_iter()
            .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.auth.admin_password, "pw");
        assert_eq!(cfg.auth.webhook_secret, "hook");
        assert_eq!(cfg.store.path, "/tmp/r.json");
    }

    #[test]
    fn bad_port_env_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| (k == "PORT").then(|| "eighty".to_string()));
        assert_eq!(cfg.server.port, 8000);
    }

    #[test]
    fn toml_sections_are_partial() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8123

            [sheets]
            detail_range = "A1:C3"
            days = [{ title = "Day 1", gid = "", status_range = "H4:H7" }]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8123);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.sheets.detail_range.cols(), 3);
        assert_eq!(cfg.sheets.days[0].gid, "");
        assert_eq!(cfg.sheets.categories.len(), 4);
        assert_eq!(cfg.auth.webhook_secret, "secret");
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.auth.webhook_secret.clear();
        assert!(cfg.normalize_and_validate().is_err());
    }
}

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use url::Url;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct PayPal {
    /// The REST API host, e.g. `https://api.sandbox.paypal.com`.
    pub base_url: Url,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    pub paypal: PayPal,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_figment(Figment::new().merge(Toml::file(path)))
            .wrap_err_with(|| format!("failed to load config from `{}`", path.to_string_lossy()))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract::<Config>()?)
    }
}

#[cfg(test)]
mod test {
    use color_eyre::eyre::Result;
    use figment::providers::{Format, Toml};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse() -> Result<()> {
        let figment = Figment::new().merge(Toml::string(
            r#"
            [paypal]
            base_url = "https://api.sandbox.paypal.com"
            "#,
        ));
        let expected = Config {
            paypal: PayPal {
                base_url: Url::parse("https://api.sandbox.paypal.com")?,
            },
        };
        assert_eq!(expected, Config::from_figment(figment)?);
        Ok(())
    }

    #[test]
    fn invalid_url() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            [paypal]
            base_url = "not a url"
            "#,
        ));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(Config::load(Path::new("does/not/exist.toml")).is_err());
    }
}

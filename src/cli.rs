//! Command-line arguments and validated configuration.
//!
//! Each flag falls back to an environment variable. Values stay optional at
//! the clap level so a missing one can be reported together with the usage
//! text instead of clap's own error.

use std::ffi::OsString;

use clap::Parser;

use crate::client::{Credentials, DEFAULT_API_BASE};
use crate::domain::{LongUrl, RecipientAddress, SenderAddress, ShortenerTemplate, ValidationError};

/// Long flags that may also be spelled with a single dash (`-from`).
const LONG_FLAGS: &[&str] = &["from", "to", "sid", "token", "shortener", "url", "api-base"];

#[derive(Parser, Debug, Default)]
#[command(name = "send-sms")]
#[command(
    about = "Send an SMS through the Twilio API. The message body is read from stdin.",
    long_about = "Send an SMS through the Twilio API.\n\nParameters can be set using flags or \
                  environment variables, and the message body should be passed on stdin. \
                  When --url is given the link is shortened and appended; the text is \
                  truncated to fit a single 160-character segment."
)]
#[command(version)]
pub struct Args {
    /// Sender phone number
    #[arg(long, env = "SMS_FROM")]
    pub from: Option<String>,

    /// Recipient phone number
    #[arg(long, env = "SMS_TO")]
    pub to: Option<String>,

    /// Account SID
    #[arg(long, env = "SMS_ACCOUNTSID", hide_env_values = true)]
    pub sid: Option<String>,

    /// Auth token
    #[arg(long, env = "SMS_AUTHTOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// URL shortener endpoint; must contain %s where the URL will be passed
    #[arg(long, env = "SMS_SHORTENER")]
    pub shortener: Option<String>,

    /// URL to shorten and append to the message
    #[arg(long, env = "SMS_URL")]
    pub url: Option<String>,

    /// Base URL of the messaging API
    #[arg(long, env = "SMS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("--{flag} flag or {env} environment variable must be supplied")]
    Missing {
        flag: &'static str,
        env: &'static str,
    },

    #[error("if --url (SMS_URL) is given, --shortener (SMS_SHORTENER) must also be given")]
    ShortenerRequired,

    #[error("invalid value for --{flag}: {source}")]
    Invalid {
        flag: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Shortener settings, present only when a URL should be appended.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub template: ShortenerTemplate,
    pub long_url: LongUrl,
}

/// Everything one invocation needs, validated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub from: SenderAddress,
    pub to: RecipientAddress,
    pub credentials: Credentials,
    pub link: Option<LinkConfig>,
    pub api_base: String,
}

impl Args {
    /// Validate the raw arguments.
    ///
    /// Required values are checked in order (from, to, sid, token) and the
    /// first missing one is reported. Blank values count as missing.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let from = required(self.from, "from", "SMS_FROM")?;
        let to = required(self.to, "to", "SMS_TO")?;
        let sid = required(self.sid, "sid", "SMS_ACCOUNTSID")?;
        let token = required(self.token, "token", "SMS_AUTHTOKEN")?;

        let link = match present(self.url) {
            None => None,
            Some(url) => {
                let template = present(self.shortener).ok_or(ConfigError::ShortenerRequired)?;
                Some(LinkConfig {
                    template: ShortenerTemplate::new(template).map_err(invalid("shortener"))?,
                    long_url: LongUrl::new(url).map_err(invalid("url"))?,
                })
            }
        };

        Ok(Config {
            from: SenderAddress::new(from).map_err(invalid("from"))?,
            to: RecipientAddress::new(to).map_err(invalid("to"))?,
            credentials: Credentials::new(sid, token).map_err(invalid("sid/token"))?,
            link,
            api_base: self.api_base,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn required(
    value: Option<String>,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    present(value).ok_or(ConfigError::Missing { flag, env })
}

fn invalid(flag: &'static str) -> impl Fn(ValidationError) -> ConfigError {
    move |source| ConfigError::Invalid { flag, source }
}

/// Rewrite Go-style single-dash long flags (`-from`, `-url=...`) to `--from`.
///
/// Arguments after a bare `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let single_dash_long = text
                .strip_prefix('-')
                .is_some_and(|rest| !rest.starts_with('-') && is_long_flag(rest));
            if single_dash_long {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

fn is_long_flag(arg: &str) -> bool {
    let name = arg.split_once('=').map_or(arg, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    fn complete() -> Args {
        Args {
            from: Some("+15005550006".to_owned()),
            to: Some("+15005550010".to_owned()),
            sid: Some("AC123".to_owned()),
            token: Some("secret".to_owned()),
            shortener: None,
            url: None,
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    #[test]
    fn complete_args_produce_config_without_link() {
        let config = complete().into_config().unwrap();
        assert_eq!(config.from.as_str(), "+15005550006");
        assert_eq!(config.to.as_str(), "+15005550010");
        assert_eq!(config.credentials.account_sid.as_str(), "AC123");
        assert_eq!(config.credentials.auth_token.as_str(), "secret");
        assert!(config.link.is_none());
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn missing_required_values_are_reported_in_order() {
        let cases: [(fn(&mut Args), &str, &str); 4] = [
            (|a| a.from = None, "from", "SMS_FROM"),
            (|a| a.to = Some("  ".to_owned()), "to", "SMS_TO"),
            (|a| a.sid = None, "sid", "SMS_ACCOUNTSID"),
            (|a| a.token = Some(String::new()), "token", "SMS_AUTHTOKEN"),
        ];

        for (clear, expected_flag, expected_env) in cases {
            let mut args = complete();
            clear(&mut args);
            match args.into_config().unwrap_err() {
                ConfigError::Missing { flag, env } => {
                    assert_eq!(flag, expected_flag);
                    assert_eq!(env, expected_env);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        let err = Args::default().into_config().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { flag: "from", .. }));
        assert_eq!(
            err.to_string(),
            "--from flag or SMS_FROM environment variable must be supplied"
        );
    }

    #[test]
    fn url_requires_shortener() {
        let mut args = complete();
        args.url = Some("https://example.com/page".to_owned());
        assert!(matches!(
            args.into_config(),
            Err(ConfigError::ShortenerRequired)
        ));
    }

    #[test]
    fn shortener_alone_is_ignored() {
        let mut args = complete();
        args.shortener = Some("https://s.example/?u=%s".to_owned());
        let config = args.into_config().unwrap();
        assert!(config.link.is_none());
    }

    #[test]
    fn url_and_shortener_build_link_config() {
        let mut args = complete();
        args.url = Some("https://example.com/page".to_owned());
        args.shortener = Some("https://s.example/?u=%s".to_owned());
        let link = args.into_config().unwrap().link.unwrap();
        assert_eq!(link.template.as_str(), "https://s.example/?u=%s");
        assert_eq!(link.long_url.as_str(), "https://example.com/page");
    }

    #[test]
    fn bare_long_url_is_accepted() {
        let mut args = complete();
        args.url = Some("example.com/page".to_owned());
        args.shortener = Some("https://is.gd/create.php?format=simple&url=%s".to_owned());
        let link = args.into_config().unwrap().link.unwrap();
        assert_eq!(link.long_url.as_str(), "example.com/page");
    }

    #[test]
    fn shortener_without_placeholder_is_invalid() {
        let mut args = complete();
        args.url = Some("https://example.com/page".to_owned());
        args.shortener = Some("https://s.example/".to_owned());
        assert!(matches!(
            args.into_config(),
            Err(ConfigError::Invalid {
                flag: "shortener",
                source: ValidationError::MissingPlaceholder { .. }
            })
        ));
    }

    #[test]
    fn normalize_args_rewrites_single_dash_long_flags() {
        let normalized = normalize_args(args(&[
            "send-sms",
            "-from",
            "+15005550006",
            "-url=https://example.com",
            "--to",
            "+15005550010",
            "-h",
            "-unknown",
        ]));
        assert_eq!(
            normalized,
            args(&[
                "send-sms",
                "--from",
                "+15005550006",
                "--url=https://example.com",
                "--to",
                "+15005550010",
                "-h",
                "-unknown",
            ])
        );
    }

    #[test]
    fn normalize_args_stops_at_double_dash() {
        let normalized = normalize_args(args(&["send-sms", "--", "-from"]));
        assert_eq!(normalized, args(&["send-sms", "--", "-from"]));
    }

    #[test]
    fn normalize_args_keeps_program_name() {
        let normalized = normalize_args(args(&["-from"]));
        assert_eq!(normalized, args(&["-from"]));
    }

    #[test]
    fn parses_go_style_flags_into_config() {
        let parsed = Args::try_parse_from(normalize_args(args(&[
            "send-sms",
            "-from",
            "+15005550006",
            "-to",
            "+15005550010",
            "-sid",
            "AC123",
            "-token",
            "secret",
            "-api-base",
            "http://127.0.0.1:8080",
        ])))
        .unwrap();
        let config = parsed.into_config().unwrap();
        assert_eq!(config.credentials.account_sid.as_str(), "AC123");
        assert_eq!(config.api_base, "http://127.0.0.1:8080");
    }
}

use std::path::Path;

use crate::error::{ConfigErrorKind, Result};
use crate::sim::SIM_MAX_DIGITS;
use crate::wire::{AudioCodec, MAX_PAYLOAD_SIZE, VideoCodec};

pub const DEFAULT_SERVER_IP: &str = "192.168.1.100";
pub const DEFAULT_SERVER_PORT: u16 = 6605;
pub const DEFAULT_SIM_NUMBER: &str = "123456789012";
pub const DEFAULT_CHANNEL: u8 = 1;

/// Per-session encoder parameters.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Terminal SIM number, up to 12 decimal digits.
    pub sim_number: String,
    /// Logical channel number.
    pub channel: u8,
    pub video_codec: VideoCodec,
    pub audio_codec: AudioCodec,
    /// Largest payload per packet (`M`).
    pub max_payload: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sim_number: DEFAULT_SIM_NUMBER.to_string(),
            channel: DEFAULT_CHANNEL,
            video_codec: VideoCodec::H264,
            audio_codec: AudioCodec::G711A,
            max_payload: MAX_PAYLOAD_SIZE,
        }
    }
}

impl EncoderConfig {
    pub fn new(sim_number: &str, channel: u8, video_codec: VideoCodec) -> Self {
        Self {
            sim_number: sim_number.to_string(),
            channel,
            video_codec,
            ..Self::default()
        }
    }

    /// Check the SIM number and payload bound before a session is built.
    pub fn validate(&self) -> Result<()> {
        if self.sim_number.len() > SIM_MAX_DIGITS {
            return Err(ConfigErrorKind::SimTooLong(self.sim_number.len()).into());
        }
        if !self.sim_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigErrorKind::SimNotNumeric.into());
        }
        if self.max_payload == 0 || self.max_payload > u16::MAX as usize {
            return Err(ConfigErrorKind::InvalidMaxPayload(self.max_payload).into());
        }
        Ok(())
    }
}

/// Where to push a stream and as whom.
///
/// Loadable from a device config file of `KEY=VALUE` lines:
///
/// ```text
/// # JT/T 1078 push target
/// SERVER_IP=10.0.0.5
/// SERVER_PORT=6605
/// SIM_NUMBER=013912345678
/// CHANNEL=1
/// ```
///
/// Unknown keys are ignored; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub server_ip: String,
    pub server_port: u16,
    pub sim_number: String,
    pub channel: u8,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            server_ip: DEFAULT_SERVER_IP.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            sim_number: DEFAULT_SIM_NUMBER.to_string(),
            channel: DEFAULT_CHANNEL,
        }
    }
}

impl StreamConfig {
    /// Parse `KEY=VALUE` text on top of the defaults.
    ///
    /// ## Examples
    ///
    /// ```
    /// use jtt1078::StreamConfig;
    ///
    /// let cfg = StreamConfig::parse("SERVER_IP=10.0.0.5\nCHANNEL=3\n").unwrap();
    /// assert_eq!(cfg.server_ip, "10.0.0.5");
    /// assert_eq!(cfg.channel, 3);
    /// assert_eq!(cfg.server_port, 6605);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut cfg = Self::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or(ConfigErrorKind::InvalidLine(idx + 1))?;
            let key = key.trim();
            let value = value.trim();

            match key {
                "SERVER_IP" => cfg.server_ip = value.to_string(),
                "SERVER_PORT" => {
                    cfg.server_port = value
                        .parse()
                        .map_err(|_| ConfigErrorKind::InvalidValue(key.to_string()))?
                }
                "SIM_NUMBER" => cfg.sim_number = value.to_string(),
                "CHANNEL" => {
                    cfg.channel = value
                        .parse()
                        .map_err(|_| ConfigErrorKind::InvalidValue(key.to_string()))?
                }
                _ => tracing::debug!(key, line = idx + 1, "ignoring unknown config key"),
            }
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg = Self::parse(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded stream config");
        Ok(cfg)
    }

    /// `ip:port` of the push target.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_ip, self.server_port)
    }

    /// Encoder parameters for this target with the given codec.
    pub fn encoder_config(&self, video_codec: VideoCodec) -> EncoderConfig {
        EncoderConfig::new(&self.sim_number, self.channel, video_codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Jtt1078Error;

    fn config_kind(err: Jtt1078Error) -> ConfigErrorKind {
        match err {
            Jtt1078Error::Config { kind } => kind,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_encoder_config_is_valid() {
        assert!(EncoderConfig::default().validate().is_ok());
    }

    #[test]
    fn sim_too_long() {
        let cfg = EncoderConfig::new("1234567890123", 1, VideoCodec::H264);
        assert_eq!(
            config_kind(cfg.validate().unwrap_err()),
            ConfigErrorKind::SimTooLong(13)
        );
    }

    #[test]
    fn sim_with_letters() {
        let cfg = EncoderConfig::new("12345abc", 1, VideoCodec::H264);
        assert_eq!(
            config_kind(cfg.validate().unwrap_err()),
            ConfigErrorKind::SimNotNumeric
        );
    }

    #[test]
    fn zero_max_payload_rejected() {
        let cfg = EncoderConfig {
            max_payload: 0,
            ..EncoderConfig::default()
        };
        assert_eq!(
            config_kind(cfg.validate().unwrap_err()),
            ConfigErrorKind::InvalidMaxPayload(0)
        );
    }

    #[test]
    fn parse_full_file() {
        let text = "# push target\nSERVER_IP=10.1.2.3\nSERVER_PORT=7000\n\nSIM_NUMBER=013912345678\nCHANNEL=4\nEXTRA=1\n";
        let cfg = StreamConfig::parse(text).unwrap();
        assert_eq!(
            cfg,
            StreamConfig {
                server_ip: "10.1.2.3".to_string(),
                server_port: 7000,
                sim_number: "013912345678".to_string(),
                channel: 4,
            }
        );
        assert_eq!(cfg.server_addr(), "10.1.2.3:7000");
    }

    #[test]
    fn parse_empty_keeps_defaults() {
        assert_eq!(StreamConfig::parse("").unwrap(), StreamConfig::default());
    }

    #[test]
    fn parse_bad_port() {
        let err = StreamConfig::parse("SERVER_PORT=abc").unwrap_err();
        assert_eq!(
            config_kind(err),
            ConfigErrorKind::InvalidValue("SERVER_PORT".to_string())
        );
    }

    #[test]
    fn parse_line_without_equals() {
        let err = StreamConfig::parse("SERVER_IP=1.2.3.4\ngarbage\n").unwrap_err();
        assert_eq!(config_kind(err), ConfigErrorKind::InvalidLine(2));
    }

    #[test]
    fn channel_out_of_range() {
        assert!(StreamConfig::parse("CHANNEL=300").is_err());
    }
}

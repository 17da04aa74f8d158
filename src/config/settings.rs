use serde::{Deserialize, Serialize};

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub board: BoardSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP and WebSocket listeners bind.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub ws_port: u16,
}

/// Display and fan-out tuning.
///
/// `viewer_buffer` bounds each live viewer's queue; a viewer that lets it
/// fill up is dropped.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BoardSettings {
    pub viewer_buffer: usize,
    pub refresh_secs: u64,
    pub scroll_secs: u64,
    pub max_visible: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl ServerSettings {
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ws_addr(&self) -> String {
        format!("{}:{}", self.host, self.ws_port)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub board: Option<PartialBoardSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub ws_port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialBoardSettings {
    pub viewer_buffer: Option<usize>,
    pub refresh_secs: Option<u64>,
    pub scroll_secs: Option<u64>,
    pub max_visible: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                ws_port: 8081,
            },
            board: BoardSettings {
                viewer_buffer: 32,
                refresh_secs: 5,
                scroll_secs: 3,
                max_visible: 6,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl PartialSettings {
    /// Overlays whatever was provided on top of `defaults`.
    pub fn merge(self, defaults: Settings) -> Settings {
        let server = self.server.unwrap_or_default();
        let board = self.board.unwrap_or_default();
        let logging = self.logging.unwrap_or_default();

        Settings {
            server: ServerSettings {
                host: server.host.unwrap_or(defaults.server.host),
                port: server.port.unwrap_or(defaults.server.port),
                ws_port: server.ws_port.unwrap_or(defaults.server.ws_port),
            },
            board: BoardSettings {
                viewer_buffer: board
                    .viewer_buffer
                    .unwrap_or(defaults.board.viewer_buffer),
                refresh_secs: board.refresh_secs.unwrap_or(defaults.board.refresh_secs),
                scroll_secs: board.scroll_secs.unwrap_or(defaults.board.scroll_secs),
                max_visible: board.max_visible.unwrap_or(defaults.board.max_visible),
            },
            logging: LoggingSettings {
                level: logging.level.unwrap_or(defaults.logging.level),
            },
        }
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document acquisition
//!
//! A source is either an `http(s)://` URL or a path to a local file.

use std::fmt;
use std::path::PathBuf;

use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Where an HTML document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote document fetched over HTTP(S)
    Url(Url),
    /// Local file
    Path(PathBuf),
}

impl Source {
    /// Interpret a command line argument.
    ///
    /// Only arguments starting with `http://` or `https://` are treated as
    /// URLs; everything else is a path.
    pub fn parse(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Source::Url(Url::parse(source)?))
        } else {
            Ok(Source::Path(PathBuf::from(source)))
        }
    }

    /// Check if this source needs the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// Read the document text
    pub async fn load(&self, config: &FetchConfig) -> Result<String> {
        match self {
            Source::Url(url) => fetch(url, config).await,
            Source::Path(path) => {
                debug!(path = %path.display(), "reading local document");
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn fetch(url: &Url, config: &FetchConfig) -> Result<String> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .redirect(Policy::limited(config.max_redirects))
        .build()?;

    info!(url = %url, "fetching document");
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    debug!(url = %url, bytes = body.len(), "fetched document");
    Ok(body)
}

//! One-shot status banners.
//!
//! A handler that renders its own page passes the flash straight to the
//! layout. A handler that redirects stores it in the `flash` cookie, and
//! the next page that renders takes it out again.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    fn to_cookie_value(&self) -> String {
        format!(
            "{}:{}",
            self.level.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    fn from_cookie_value(value: &str) -> Option<Self> {
        let (level, message) = value.split_once(':')?;
        let message = urlencoding::decode(message).ok()?;
        Some(Flash {
            level: FlashLevel::parse(level)?,
            message: message.into_owned(),
        })
    }
}

/// Stores `flash` for the next rendered page.
pub fn push_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, flash.to_cookie_value()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Removes the pending flash, if any, from the jar and returns it.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|c| Flash::from_cookie_value(c.value()));
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, flash);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}

// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("display error: {0}")]
    DisplayIo(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no photo loaded")]
    NoPhoto,

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::InvalidImage(err.to_string())
    }
}

impl From<lodepng::Error> for Error {
    fn from(err: lodepng::Error) -> Self {
        Error::DisplayIo(err.to_string())
    }
}

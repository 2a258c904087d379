// src/server/platform.rs
//! Supported platforms and the artifact kinds served for them

use std::fmt;

/// Target platform of a release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
}

impl Platform {
    /// Parse the URL token for a platform ("win" or "mac")
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "win" => Some(Self::Windows),
            "mac" => Some(Self::MacOs),
            _ => None,
        }
    }

    /// URL and directory token for this platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::MacOs => "mac",
        }
    }

    /// Installer format published for this platform
    pub fn installer(&self) -> ArtifactKind {
        match self {
            Self::Windows => ArtifactKind::WindowsInstaller,
            Self::MacOs => ArtifactKind::DiskImage,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downloadable files that sit next to the metadata documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `.exe` installer
    WindowsInstaller,
    /// `.dmg` disk image
    DiskImage,
    /// `.md` changelog
    Changelog,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::WindowsInstaller,
        ArtifactKind::DiskImage,
        ArtifactKind::Changelog,
    ];

    /// Look up an artifact kind from a dotted extension (".exe", ".dmg", ".md")
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Dotted file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::WindowsInstaller => ".exe",
            Self::DiskImage => ".dmg",
            Self::Changelog => ".md",
        }
    }

    /// MIME type sent with the file
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::WindowsInstaller => "application/vnd.microsoft.portable-executable",
            Self::DiskImage => "application/vnd.apple.diskimage",
            Self::Changelog => "text/markdown",
        }
    }
}

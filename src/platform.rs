// src/platform.rs
//! Platform backend selection.

use crate::error::{GlutError, Result};

/// Environment variable consulted for the backend override.
pub const PLATFORM_ENV_VAR: &str = "PIGLIT_PLATFORM";

/// The windowing backend a bootstrap run is pinned to.
///
/// Fixed once by [`Glut::init`](crate::Glut::init) and never changed
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// X11 with GLX context creation. The default.
    Glx,
    /// X11 with EGL context creation.
    X11Egl,
    /// Wayland. Window and context creation work; input does not (see
    /// [`Glut::main_loop`](crate::Glut::main_loop)).
    Wayland,
}

/// Resolve the backend from an environment override.
///
/// Unset resolves to GLX. An unrecognized value is a configuration error, as
/// is picking an X11-based backend in a build without the `x11` feature.
/// Capability mismatch is caught here, at selection time, not when the
/// connection attempt fails later.
pub fn select_platform(env_override: Option<&str>) -> Result<Platform> {
    let platform = match env_override {
        None => Platform::Glx,
        Some("glx") => Platform::Glx,
        Some("x11_egl") => Platform::X11Egl,
        Some("wayland") => Platform::Wayland,
        Some(other) => {
            return Err(GlutError::Configuration(format!(
                "environment var {PLATFORM_ENV_VAR} has bad value \"{other}\""
            )))
        }
    };

    if !cfg!(feature = "x11") && matches!(platform, Platform::Glx | Platform::X11Egl) {
        return Err(GlutError::Configuration(
            "built without x11 support".to_string(),
        ));
    }

    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "x11")]
    fn unset_override_resolves_to_glx() {
        assert_eq!(select_platform(None).unwrap(), Platform::Glx);
    }

    #[test]
    #[cfg(feature = "x11")]
    fn every_supported_string_maps_to_its_platform() {
        assert_eq!(select_platform(Some("glx")).unwrap(), Platform::Glx);
        assert_eq!(select_platform(Some("x11_egl")).unwrap(), Platform::X11Egl);
        assert_eq!(select_platform(Some("wayland")).unwrap(), Platform::Wayland);
    }

    #[test]
    fn unsupported_strings_are_configuration_errors() {
        for bad in ["GLX", "x11", "weston", ""] {
            match select_platform(Some(bad)) {
                Err(GlutError::Configuration(msg)) => assert!(msg.contains(PLATFORM_ENV_VAR)),
                other => panic!("expected configuration error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    #[cfg(not(feature = "x11"))]
    fn x11_platforms_fail_without_x11_support() {
        for choice in [None, Some("glx"), Some("x11_egl")] {
            match select_platform(choice) {
                Err(GlutError::Configuration(msg)) => assert!(msg.contains("x11")),
                other => panic!("expected capability error for {choice:?}, got {other:?}"),
            }
        }
        // Wayland needs no x11 support.
        assert_eq!(select_platform(Some("wayland")).unwrap(), Platform::Wayland);
    }
}

// src/config.rs
//! Display-mode flags, context APIs and config negotiation.
//!
//! Config negotiation turns the requested display mode and context API into
//! an ordered attribute list. The list is built the same way for every
//! backend; the driver resolves it to a concrete pixel format.

use bitflags::bitflags;

use crate::error::{GlutError, Result};

/// API mask bit selecting an OpenGL ES 1.x context.
pub const OPENGL_ES1_BIT: u32 = 0x1;
/// API mask bit selecting an OpenGL ES 2.0 context.
pub const OPENGL_ES2_BIT: u32 = 0x4;
/// API mask bit selecting a desktop OpenGL context.
pub const OPENGL_BIT: u32 = 0x8;

/// Which GL variant a context targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextApi {
    /// Desktop OpenGL.
    #[default]
    OpenGl,
    /// OpenGL ES 1.x.
    OpenGlEs1,
    /// OpenGL ES 2.0.
    OpenGlEs2,
}

impl ContextApi {
    /// Map an API bitmask to the context API it names. Exactly one of the
    /// `OPENGL*_BIT` values is accepted; anything else is a configuration
    /// error.
    pub fn from_mask(mask: u32) -> Result<ContextApi> {
        match mask {
            OPENGL_BIT => Ok(ContextApi::OpenGl),
            OPENGL_ES1_BIT => Ok(ContextApi::OpenGlEs1),
            OPENGL_ES2_BIT => Ok(ContextApi::OpenGlEs2),
            _ => Err(GlutError::Configuration(format!(
                "api mask has bad value {mask:#x}"
            ))),
        }
    }

    fn attrib_value(self) -> i32 {
        match self {
            ContextApi::OpenGl => Attrib::CONTEXT_OPENGL,
            ContextApi::OpenGlEs1 => Attrib::CONTEXT_OPENGL_ES1,
            ContextApi::OpenGlEs2 => Attrib::CONTEXT_OPENGL_ES2,
        }
    }
}

bitflags! {
    /// GLUT display-mode request bits, with GLUT's numeric values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DisplayMode: u32 {
        /// Double-buffered color.
        const DOUBLE = 0x2;
        /// Accumulation buffer.
        const ACCUM = 0x4;
        /// Alpha channel. Carried in the mask for compatibility; channel
        /// sizes are requested unconditionally (see [`build_config_attribs`]).
        const ALPHA = 0x8;
        /// Depth buffer.
        const DEPTH = 0x10;
        /// Stencil buffer.
        const STENCIL = 0x20;
    }
}

impl DisplayMode {
    /// GLUT_RGB is zero. RGB and RGBA are indistinguishable in the mask,
    /// which is why config negotiation requests all four channels no matter
    /// which one the caller thinks it set.
    pub const RGB: DisplayMode = DisplayMode::empty();
    /// Alias of [`RGB`](Self::RGB); the distinction does not survive the
    /// bitmask.
    pub const RGBA: DisplayMode = DisplayMode::empty();
    /// Zero: single-buffering is the absence of [`DOUBLE`](Self::DOUBLE).
    pub const SINGLE: DisplayMode = DisplayMode::empty();
}

/// Attribute tokens understood by the context-creation driver.
///
/// The discriminants are waffle's enum values, so a raw list can be handed
/// straight to a binding of the real library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Attrib {
    /// List terminator.
    None = 0x0000,
    /// Minimum red channel size.
    RedSize = 0x0201,
    /// Minimum green channel size.
    GreenSize = 0x0202,
    /// Minimum blue channel size.
    BlueSize = 0x0203,
    /// Minimum alpha channel size.
    AlphaSize = 0x0204,
    /// Minimum depth buffer size.
    DepthSize = 0x0205,
    /// Minimum stencil buffer size.
    StencilSize = 0x0206,
    /// Whether the config is double-buffered. Drivers default this on.
    DoubleBuffered = 0x0209,
    /// Which context API the config must support.
    ContextApi = 0x020a,
    /// Whether an accumulation buffer is present.
    AccumBuffer = 0x020e,
}

impl Attrib {
    /// Value of [`Attrib::ContextApi`] naming desktop OpenGL.
    pub const CONTEXT_OPENGL: i32 = 0x020b;
    /// Value of [`Attrib::ContextApi`] naming OpenGL ES 1.x.
    pub const CONTEXT_OPENGL_ES1: i32 = 0x020c;
    /// Value of [`Attrib::ContextApi`] naming OpenGL ES 2.0.
    pub const CONTEXT_OPENGL_ES2: i32 = 0x020d;
}

/// An ordered, sentinel-terminated attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttribList {
    pairs: Vec<(Attrib, i32)>,
}

impl AttribList {
    fn push(&mut self, attrib: Attrib, value: i32) {
        self.pairs.push((attrib, value));
    }

    /// The attribute/value pairs in the order they were added, without the
    /// terminator.
    pub fn pairs(&self) -> &[(Attrib, i32)] {
        &self.pairs
    }

    /// Whether the list carries an entry for `attrib`.
    pub fn contains(&self, attrib: Attrib) -> bool {
        self.pairs.iter().any(|(a, _)| *a == attrib)
    }

    /// The value paired with `attrib`, if present.
    pub fn value_of(&self, attrib: Attrib) -> Option<i32> {
        self.pairs
            .iter()
            .find(|(a, _)| *a == attrib)
            .map(|(_, v)| *v)
    }

    /// Flatten to the raw interleaved form drivers consume, terminated by
    /// [`Attrib::None`].
    pub fn raw(&self) -> Vec<i32> {
        let mut raw = Vec::with_capacity(self.pairs.len() * 2 + 1);
        for (attrib, value) in &self.pairs {
            raw.push(*attrib as i32);
            raw.push(*value);
        }
        raw.push(Attrib::None as i32);
        raw
    }
}

/// Build the config attribute list for a context API and display mode.
///
/// The order is fixed: context API, color channel minimums, then the
/// conditional depth/stencil/double-buffer/accum entries.
pub fn build_config_attribs(api: ContextApi, mode: DisplayMode) -> AttribList {
    let mut list = AttribList::default();

    list.push(Attrib::ContextApi, api.attrib_value());

    // It is impossible to not request RGBA because GLUT_RGB and GLUT_RGBA
    // are both 0. That is, (mode & (RGB | RGBA)) is unconditionally true.
    list.push(Attrib::RedSize, 1);
    list.push(Attrib::GreenSize, 1);
    list.push(Attrib::BlueSize, 1);
    list.push(Attrib::AlphaSize, 1);

    if mode.contains(DisplayMode::DEPTH) {
        list.push(Attrib::DepthSize, 1);
    }

    if mode.contains(DisplayMode::STENCIL) {
        list.push(Attrib::StencilSize, 1);
    }

    if !mode.contains(DisplayMode::DOUBLE) {
        list.push(Attrib::DoubleBuffered, 0);
    }

    if mode.contains(DisplayMode::ACCUM) {
        list.push(Attrib::AccumBuffer, 1);
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_channel_minimums_are_always_requested() {
        // RGB and RGBA collapse to the same (zero) bit pattern, so both get
        // all four channels.
        for mode in [DisplayMode::RGB, DisplayMode::RGBA, DisplayMode::DEPTH] {
            let list = build_config_attribs(ContextApi::OpenGl, mode);
            for attrib in [
                Attrib::RedSize,
                Attrib::GreenSize,
                Attrib::BlueSize,
                Attrib::AlphaSize,
            ] {
                assert_eq!(list.value_of(attrib), Some(1), "{attrib:?} in {mode:?}");
            }
        }
    }

    #[test]
    fn double_buffering_is_disabled_iff_double_is_absent() {
        let single = build_config_attribs(ContextApi::OpenGl, DisplayMode::RGB);
        assert_eq!(single.value_of(Attrib::DoubleBuffered), Some(0));

        let double = build_config_attribs(ContextApi::OpenGl, DisplayMode::DOUBLE);
        assert!(!double.contains(Attrib::DoubleBuffered));
    }

    #[test]
    fn depth_stencil_and_accum_are_conditional() {
        let plain = build_config_attribs(ContextApi::OpenGl, DisplayMode::RGB);
        assert!(!plain.contains(Attrib::DepthSize));
        assert!(!plain.contains(Attrib::StencilSize));
        assert!(!plain.contains(Attrib::AccumBuffer));

        let full = build_config_attribs(
            ContextApi::OpenGl,
            DisplayMode::DEPTH | DisplayMode::STENCIL | DisplayMode::ACCUM,
        );
        assert_eq!(full.value_of(Attrib::DepthSize), Some(1));
        assert_eq!(full.value_of(Attrib::StencilSize), Some(1));
        assert_eq!(full.value_of(Attrib::AccumBuffer), Some(1));
    }

    #[test]
    fn attribute_order_is_fixed() {
        let list = build_config_attribs(
            ContextApi::OpenGlEs2,
            DisplayMode::DEPTH | DisplayMode::STENCIL | DisplayMode::ACCUM,
        );
        let order: Vec<Attrib> = list.pairs().iter().map(|(a, _)| *a).collect();
        assert_eq!(
            order,
            vec![
                Attrib::ContextApi,
                Attrib::RedSize,
                Attrib::GreenSize,
                Attrib::BlueSize,
                Attrib::AlphaSize,
                Attrib::DepthSize,
                Attrib::StencilSize,
                Attrib::DoubleBuffered,
                Attrib::AccumBuffer,
            ]
        );
        assert_eq!(
            list.value_of(Attrib::ContextApi),
            Some(Attrib::CONTEXT_OPENGL_ES2)
        );
    }

    #[test]
    fn raw_form_is_sentinel_terminated() {
        let list = build_config_attribs(ContextApi::OpenGl, DisplayMode::DOUBLE);
        let raw = list.raw();
        assert_eq!(raw.len() % 2, 1);
        assert_eq!(*raw.last().unwrap(), Attrib::None as i32);
        assert_eq!(raw[0], Attrib::ContextApi as i32);
        assert_eq!(raw[1], Attrib::CONTEXT_OPENGL);
    }

    #[test]
    fn api_mask_maps_each_bit_and_rejects_the_rest() {
        assert_eq!(ContextApi::from_mask(OPENGL_BIT).unwrap(), ContextApi::OpenGl);
        assert_eq!(
            ContextApi::from_mask(OPENGL_ES1_BIT).unwrap(),
            ContextApi::OpenGlEs1
        );
        assert_eq!(
            ContextApi::from_mask(OPENGL_ES2_BIT).unwrap(),
            ContextApi::OpenGlEs2
        );
        for bad in [0, 0x2, OPENGL_BIT | OPENGL_ES2_BIT, 0x100] {
            assert!(ContextApi::from_mask(bad).is_err(), "mask {bad:#x}");
        }
    }
}

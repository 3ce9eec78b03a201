//! # Pixeldeck
//!
//! An interactive desktop dashboard for quick single-image transforms:
//! load an image, apply one of a small set of pixel-level transforms,
//! compare the result side by side with the original, check brightness
//! and contrast statistics, and save the output as PNG or JPEG.
//!
//! # Architecture: One Page, One Pass
//!
//! The whole tool is a single page rendered as a pure function of session
//! state. Every interaction — a new upload, a mode change, a slider drag —
//! reruns the full pipeline synchronously:
//!
//! ```text
//! bytes → decode → dispatch(mode, factor) → statistics → render + export
//! ```
//!
//! There is no persistence, no caching across interactions, and no
//! background work. A failure anywhere in the pass is caught at the
//! session boundary and shown as a one-line recoverable error; the next
//! interaction starts a fresh run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pure image operations: decode, the four transform policies, Sobel edges, quantization, statistics, PNG/JPEG export |
//! | [`session`] | The per-interaction state machine the page renders from, and the single error channel |
//! | [`app`] | The immediate-mode page: sidebar controls, two-column preview, information panel, statistics, downloads |
//!
//! # Design Decisions
//!
//! ## Transforms as an Enumeration
//!
//! The four processing policies are a tagged enum dispatched in one
//! `match` ([`imaging::ProcessingMode`]), not a chain of conditionals.
//! Adding a policy means adding a variant and an arm; the selector, the
//! download filenames, and the dispatcher all follow from the enum.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, encoding, and every pixel operation run on the `image`
//! crate's typed buffers — no system libraries, a single self-contained
//! binary. The Sobel filter is a hand-rolled 3×3 convolution pair kept in
//! its own module so its normalization is unit-testable in isolation.
//!
//! ## Immediate-Mode UI
//!
//! The page is re-rendered every frame from the [`session::Session`].
//! That makes the "recompute everything on every interaction" contract a
//! structural property rather than a discipline: the UI cannot observe
//! stale pipeline state because it never holds any.

pub mod app;
pub mod imaging;
pub mod session;

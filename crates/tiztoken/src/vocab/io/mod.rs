//! # Vocabulary IO
//!
//! * [`model_io`] - the ``tiztoken v1`` model file, and the ``.vocab`` listing.
//! * [`base64_vocab`] - ``tiktoken`` style ``{BASE64 SPAN} {TOKEN}`` vocab files.
//!
//! ## Loading A Model
//!
//! ```rust,no_run
//! use tiztoken::vocab::io::{ModelFile, load_model_path};
//!
//! let model: ModelFile<u32> = load_model_path("tok.model")?;
//! println!("{} merges", model.merges.num_merges());
//! # Ok::<(), tiztoken::TiztokenError>(())
//! ```

pub mod base64_vocab;
pub mod model_io;

#[doc(inline)]
pub use base64_vocab::*;
#[doc(inline)]
pub use model_io::*;

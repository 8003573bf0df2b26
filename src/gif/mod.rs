//! GIF89a writer using the uncompressed-LZW trick: every data sub-block
//! opens with a CLEAR code, so index bytes pass through the decoder as
//! literals and no dictionary is ever built.

mod encode;

pub(crate) use encode::encode_gif;

pub mod token_codec;

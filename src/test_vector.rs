//! Known-answer test vectors, stored as JSON under `test-vectors/`.

use crate::fields::BLOCK_SIZE;
use anyhow::{Context, anyhow};
use serde::{Deserialize, de::DeserializeOwned};

/// Includes a test vector file at compile time.
macro_rules! test_vector_file {
    ($path:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/test-vectors/",
            $path,
            ".json"
        ))
    };
}

/// Top level of every test vector file.
#[derive(Debug, Clone, Deserialize)]
struct TestVectorFile<T> {
    /// Where the vectors come from.
    #[allow(dead_code)]
    source: String,
    vectors: Vec<T>,
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, anyhow::Error> {
    let file: TestVectorFile<T> =
        serde_json::from_str(json).context("failed to parse test vector file")?;
    Ok(file.vectors)
}

fn decode_block(hex_block: &str) -> Result<[u8; BLOCK_SIZE], anyhow::Error> {
    let bytes = hex::decode(hex_block).context("invalid hex in test vector")?;
    <[u8; BLOCK_SIZE]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow!("test vector block {hex_block} is {} bytes", bytes.len()))
}

#[derive(Debug, Clone, Deserialize)]
struct SerializedDoubling {
    description: String,
    input: String,
    output: String,
}

/// A single doubling, in the external form of one convention.
#[derive(Debug, Clone)]
pub(crate) struct DoublingTestVector {
    pub(crate) description: String,
    pub(crate) input: [u8; BLOCK_SIZE],
    pub(crate) output: [u8; BLOCK_SIZE],
}

impl DoublingTestVector {
    /// Load the doubling vectors for a convention: one of `gcm`, `eax` or `xts`.
    pub(crate) fn load_all(convention: &str) -> Result<Vec<Self>, anyhow::Error> {
        let json = match convention {
            "gcm" => test_vector_file!("double/gcm"),
            "eax" => test_vector_file!("double/eax"),
            "xts" => test_vector_file!("double/xts"),
            _ => return Err(anyhow!("no doubling test vectors for {convention}")),
        };

        parse::<SerializedDoubling>(json)?
            .into_iter()
            .map(|vector| {
                Ok(Self {
                    input: decode_block(&vector.input)?,
                    output: decode_block(&vector.output)?,
                    description: vector.description,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SerializedMultiplication {
    description: String,
    x: String,
    y: String,
    product: String,
}

/// A single GCM-convention multiplication.
#[derive(Debug, Clone)]
pub(crate) struct MultiplicationTestVector {
    pub(crate) description: String,
    pub(crate) x: [u8; BLOCK_SIZE],
    pub(crate) y: [u8; BLOCK_SIZE],
    pub(crate) product: [u8; BLOCK_SIZE],
}

impl MultiplicationTestVector {
    pub(crate) fn load_all() -> Result<Vec<Self>, anyhow::Error> {
        parse::<SerializedMultiplication>(test_vector_file!("multiply"))?
            .into_iter()
            .map(|vector| {
                Ok(Self {
                    x: decode_block(&vector.x)?,
                    y: decode_block(&vector.y)?,
                    product: decode_block(&vector.product)?,
                    description: vector.description,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SerializedGhash {
    description: String,
    h: String,
    aad: String,
    ciphertext: String,
    ghash: String,
}

/// GHASH over the additional data and ciphertext of a GCM encryption.
#[derive(Debug, Clone)]
pub(crate) struct GhashTestVector {
    pub(crate) description: String,
    pub(crate) h: [u8; BLOCK_SIZE],
    pub(crate) aad: Vec<u8>,
    pub(crate) ciphertext: Vec<u8>,
    pub(crate) ghash: [u8; BLOCK_SIZE],
}

impl GhashTestVector {
    pub(crate) fn load_all() -> Result<Vec<Self>, anyhow::Error> {
        parse::<SerializedGhash>(test_vector_file!("ghash"))?
            .into_iter()
            .map(|vector| {
                Ok(Self {
                    h: decode_block(&vector.h)?,
                    aad: hex::decode(&vector.aad).context("invalid hex in aad")?,
                    ciphertext: hex::decode(&vector.ciphertext)
                        .context("invalid hex in ciphertext")?,
                    ghash: decode_block(&vector.ghash)?,
                    description: vector.description,
                })
            })
            .collect()
    }

    /// The final GHASH block: bit lengths of the additional data and ciphertext, big-endian.
    pub(crate) fn length_block(&self) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..8].copy_from_slice(&(self.aad.len() as u64 * 8).to_be_bytes());
        block[8..].copy_from_slice(&(self.ciphertext.len() as u64 * 8).to_be_bytes());
        block
    }
}

#[cfg(test)]
mod tests {
    use crate::test_vector::{DoublingTestVector, GhashTestVector, MultiplicationTestVector};
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test(unsupported = test)]
    fn all_files_load() {
        for convention in ["gcm", "eax", "xts"] {
            assert!(!DoublingTestVector::load_all(convention).unwrap().is_empty());
        }
        assert!(!MultiplicationTestVector::load_all().unwrap().is_empty());
        assert!(!GhashTestVector::load_all().unwrap().is_empty());
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn unknown_convention() {
        DoublingTestVector::load_all("ocb").unwrap_err();
    }

    #[wasm_bindgen_test(unsupported = test)]
    fn length_block_counts_bits() {
        let vector = GhashTestVector::load_all()
            .unwrap()
            .into_iter()
            .find(|vector| vector.description == "test case 4")
            .unwrap();
        assert_eq!(
            hex::encode(vector.length_block()),
            "00000000000000a000000000000001e0"
        );
    }
}

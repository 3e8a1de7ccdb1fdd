#![no_main]

use field128::{Backend, GcmElement, Multiplier, MultiplierContext};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| fuzz(data));

fn fuzz(data: &[u8]) {
    let Some((key, y)) = data.split_first_chunk::<16>() else {
        return;
    };
    // Anything other than exactly one more block must be rejected, never truncated or padded.
    let Ok(y) = GcmElement::try_from(y) else {
        assert_ne!(y.len(), 16);
        return;
    };

    let expected = MultiplierContext::with_backend(key, Backend::Serial)
        .unwrap()
        .multiply(&y);
    for backend in [Backend::Portable, Backend::Clmul] {
        if let Ok(context) = MultiplierContext::with_backend(key, backend) {
            assert_eq!(context.multiply(&y), expected, "{backend}");
        }
    }
}

#![no_main]

use field128::{Multiplier, MultiplierContext, dbl, dbl_eax, dbl_xts};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 16]| fuzz(data));

fn fuzz(data: [u8; 16]) {
    let mut x = [0u8; 16];
    x[0] = 0x40;
    assert_eq!(
        MultiplierContext::new(&x).multiply_bytes(&data).unwrap(),
        dbl(&data)
    );

    let mut reversed = data;
    reversed.reverse();
    let mut expected = dbl_eax(&reversed);
    expected.reverse();
    assert_eq!(dbl_xts(&data), expected);
}

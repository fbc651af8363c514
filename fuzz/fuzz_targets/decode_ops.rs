#![no_main]
use bitcluster::{decode, decode_to_vec, decoded_size, encode_to_vec, Config, Error, Word};
use libfuzzer_sys::fuzz_target;

// Keeps a corrupt header from allocating gigabytes.
const MAX_DECODED: usize = 1 << 20;

fn config(selector: u8) -> Config {
    let base = if selector & 1 == 0 {
        Config::list()
    } else {
        Config::set()
    };
    base.with_skip_full_subtrees(selector & 2 != 0)
        .with_min_cluster_length(usize::from(selector >> 2) % 5)
}

fn decode_arbitrary<W: Word>(data: &[u8], config: &Config) {
    let Ok(len) = decoded_size::<W>(data, config) else {
        return;
    };
    if len > MAX_DECODED {
        return;
    }
    let mut out = vec![W::default(); len];
    if let Err(e) = decode(data, config, &mut out) {
        assert!(matches!(e, Error::WrongFormat(_)), "unexpected error {e:?}");
    }
}

fn roundtrip<W: Word>(mut values: Vec<W>, config: &Config) {
    values.sort_unstable();
    if !config.allow_repeated_values() {
        values.dedup();
    }
    match encode_to_vec(&values, config) {
        Ok(bytes) => {
            let back: Vec<W> = decode_to_vec(&bytes, config).unwrap();
            assert_eq!(back, values);
        }
        Err(e) => assert!(values.is_empty(), "encode failed: {e:?}"),
    }
}

fuzz_target!(|data: (u8, u8, Vec<u32>, Vec<u64>, Vec<u8>)| {
    let (selector, width, narrow, wide, garbage) = data;
    let config = config(selector);

    decode_arbitrary::<u32>(&garbage, &config);
    decode_arbitrary::<u64>(&garbage, &config);
    decode_arbitrary::<u64>(&garbage, &config.with_bit_width(u32::from(width) % 65));

    roundtrip(narrow, &config);
    roundtrip(wide, &config);
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use ips_patcher::ips;

fuzz_target!(|data: &[u8]| {
    // The decoder must never panic, only return errors.
    let _ = ips::decode(data);

    // Also fuzz past the magic check, and apply whatever decodes.
    let mut framed = ips::IPS_MAGIC.to_vec();
    framed.extend_from_slice(data);
    if let Ok(patch) = ips::decode(&framed) {
        let _ = patch.apply(data);
    }
});

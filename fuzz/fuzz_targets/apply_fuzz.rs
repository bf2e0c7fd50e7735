#![no_main]
use libfuzzer_sys::fuzz_target;
use ips_patcher::ips;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let split = data.len() / 2;
    let (target, patch) = data.split_at(split);
    let mut framed = ips::IPS_MAGIC.to_vec();
    framed.extend_from_slice(patch);
    framed.extend_from_slice(&ips::EOF_MARKER);

    if let Ok(p) = ips::decode(&framed) {
        let out = p.apply(target);
        assert_eq!(out.len(), target.len().max(p.highest_patched_offset()));

        let mut in_place = target.to_vec();
        p.apply_into(&mut in_place);
        assert_eq!(in_place, out);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use xpick::config::SessionConfig;
use xpick::params::{Param, ParamKind, ParameterStore};
use xpick::timefmt::parse_timestamp;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Free text typed into any field must parse or fail, never panic
    let _ = parse_timestamp(text);
    let mut store = ParameterStore::new();
    for param in Param::ALL {
        if param.kind() == ParamKind::Text {
            let _ = store.set_text(param, text);
        }
    }
    let snapshot = store.snapshot();
    let _ = snapshot.selection();
    let _ = snapshot.processing();
    let _ = snapshot.normalization();

    if let Ok(config) = SessionConfig::from_str(text) {
        let _ = config.build_phases();
        let _ = config.image_size();
    }
});

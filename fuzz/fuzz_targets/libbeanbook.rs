#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let ledger = libbeanbook::load(input);
        let _ = ledger.balances("0000-00-00", "9999-99-99");
        let _ = libbeanbook::io::list_open_account_names(input);
    }
});

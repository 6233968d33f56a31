#![no_main]

use apperr::{Classifier, Code, Failure, Language, ServiceType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }
    let code = Code::new(u32::from_le_bytes([data[0], data[1], data[2], data[3]]));
    let service = ServiceType::ALL[usize::from(data[4]) % ServiceType::ALL.len()];
    let language = if data[5] & 1 == 0 { Language::En } else { Language::Id };
    let debug = data[5] & 2 != 0;
    let text = String::from_utf8_lossy(&data[6..]).into_owned();

    let classifier = Classifier::standard();
    let err = Failure::annotate(text.clone(), code, &text);
    let (status, compiled) = classifier.compile(service, &err, language, debug);
    assert_eq!(status, compiled.status());
    assert_eq!(debug, compiled.debug_error().is_some());
});

/*
    This file is part of cpscan.

    cpscan is free software: you can redistribute it and/or modify
    it under the terms of the GNU Lesser General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    cpscan is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU Lesser General Public License
    along with cpscan. (LICENSE.md)  If not, see <https://www.gnu.org/licenses/>.
*/
use crate::mod_utf8::{modified_utf8_to_string, string_to_modified_utf8, MUTFError};

#[test]
fn test_to_modified_utf8_supplementary() {
    // U+1F600 is the surrogate pair D83D DE00, each half in three bytes
    let emoji = "\u{1F600}";
    assert_eq!(
        string_to_modified_utf8(emoji),
        vec![0b11101101, 0b10100000, 0b10111101, 0b11101101, 0b10111000, 0b10000000]
    );
}

#[test]
fn test_from_modified_utf8_supplementary() {
    assert_eq!(
        modified_utf8_to_string(&[
            0b11101101, 0b10100000, 0b10111101, 0b11101101, 0b10111000, 0b10000000
        ])
        .unwrap(),
        "\u{1F600}"
    )
}

#[test]
fn test_from_modified_utf8_3bytes() {
    assert_eq!(
        modified_utf8_to_string(&[0b11101111, 0b10111100, 0b10110100]).unwrap(),
        "Ｔ"
    )
}

#[test]
fn test_nul_is_two_bytes() {
    assert_eq!(string_to_modified_utf8("a\u{0000}b"), vec![b'a', 0xC0, 0x80, b'b']);
    assert_eq!(modified_utf8_to_string(&[b'a', 0xC0, 0x80, b'b']).unwrap(), "a\u{0000}b");
}

#[test]
fn test_from_modified_utf8_2bytes() {
    assert_eq!(modified_utf8_to_string(&[0b11001110, 0b10101001]).unwrap(), "Ω");
}

#[test]
fn test_mixed_text_survives() {
    let text = "pkg/Ünïcødé$Inner\u{10FFFF}";
    assert_eq!(modified_utf8_to_string(&string_to_modified_utf8(text)).unwrap(), text);
}

#[test]
fn test_ascii() {
    assert_eq!(modified_utf8_to_string(b"java/lang/Object").unwrap(), "java/lang/Object");
    assert_eq!(modified_utf8_to_string(b"").unwrap(), "");
}

#[test]
fn test_partial_character_at_end() {
    assert_eq!(
        modified_utf8_to_string(&[b'a', 0b11101111, 0b10111100]),
        Err(MUTFError::PartialCharacterAtEnd)
    );
    assert_eq!(modified_utf8_to_string(&[0xC3]), Err(MUTFError::PartialCharacterAtEnd));
}

#[test]
fn test_bad_bytes() {
    // a continuation byte cannot start a character
    assert_eq!(modified_utf8_to_string(&[b'a', 0x80]), Err(MUTFError::AroundByte(1)));
    // four byte forms do not exist in modified utf-8
    assert_eq!(
        modified_utf8_to_string(&[0xF0, 0x9F, 0x98, 0x80]),
        Err(MUTFError::AroundByte(0))
    );
    // second byte is not a continuation
    assert_eq!(modified_utf8_to_string(&[0xC3, b'a']), Err(MUTFError::AroundByte(1)));
}

#[test]
fn test_unpaired_surrogate() {
    // a lone high surrogate D800
    assert_eq!(
        modified_utf8_to_string(&[0xED, 0xA0, 0x80, b'x']),
        Err(MUTFError::UnpairedSurrogate(0xD800))
    );
}

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

pub const VERSION: &str = "15.1";

pub const TONES: [&str; 5] = ["1F3FB", "1F3FC", "1F3FD", "1F3FE", "1F3FF"];

pub const EMOJI_DATA: &str = "\
# emoji-data.txt
0023          ; Emoji                # E0.0   [1] (#️)       hash sign
00A9          ; Emoji                # E0.6   [1] (©️)       copyright
261D          ; Emoji                # E0.6   [1] (☝️)       index pointing up
1F1F8         ; Emoji                # E0.0   [1] (🇸)       regional indicator symbol letter s
1F1FA         ; Emoji                # E0.0   [1] (🇺)       regional indicator symbol letter u
1F3FB..1F3FF  ; Emoji                # E1.0   [5] (🏻..🏿)    light skin tone..dark skin tone
1F44B         ; Emoji                # E0.6   [1] (👋)       waving hand
1F468         ; Emoji                # E0.6   [1] (👨)       man
1F4BB         ; Emoji                # E0.6   [1] (💻)       laptop
1F600..1F602  ; Emoji                # E1.0   [3] (😀..😂)    grinning face..face with tears of joy
1F91D         ; Emoji                # E3.0   [1] (🤝)       handshake
1F9D1         ; Emoji                # E5.0   [1] (🧑)       person

1F1F8         ; Emoji_Presentation   # E0.0   [1] (🇸)       regional indicator symbol letter s
1F1FA         ; Emoji_Presentation   # E0.0   [1] (🇺)       regional indicator symbol letter u
1F3FB..1F3FF  ; Emoji_Presentation   # E1.0   [5] (🏻..🏿)    light skin tone..dark skin tone
1F44B         ; Emoji_Presentation   # E0.6   [1] (👋)       waving hand
1F468         ; Emoji_Presentation   # E0.6   [1] (👨)       man
1F4BB         ; Emoji_Presentation   # E0.6   [1] (💻)       laptop
1F600..1F602  ; Emoji_Presentation   # E1.0   [3] (😀..😂)    grinning face..face with tears of joy
1F91D         ; Emoji_Presentation   # E3.0   [1] (🤝)       handshake
1F9D1         ; Emoji_Presentation   # E5.0   [1] (🧑)       person

1F3FB..1F3FF  ; Emoji_Modifier       # E1.0   [5] (🏻..🏿)    light skin tone..dark skin tone

261D          ; Emoji_Modifier_Base  # E0.6   [1] (☝️)       index pointing up
1F44B         ; Emoji_Modifier_Base  # E0.6   [1] (👋)       waving hand
1F468         ; Emoji_Modifier_Base  # E0.6   [1] (👨)       man
1F9D1         ; Emoji_Modifier_Base  # E5.0   [1] (🧑)       person

0023          ; Emoji_Component      # E0.0   [1] (#️)       hash sign
200D          ; Emoji_Component      # E2.0   [1] (‍)        zero width joiner
20E3          ; Emoji_Component      # E0.6   [1] (⃣)       combining enclosing keycap
FE0F          ; Emoji_Component      # E2.0   [1] ()        VARIATION SELECTOR-16
1F1F8         ; Emoji_Component      # E0.0   [1] (🇸)       regional indicator symbol letter s
1F1FA         ; Emoji_Component      # E0.0   [1] (🇺)       regional indicator symbol letter u
1F3FB..1F3FF  ; Emoji_Component      # E1.0   [5] (🏻..🏿)    light skin tone..dark skin tone

1FC00..1FFFD  ; Extended_Pictographic# E0.0[1022] (🰀️..🿽️)  <reserved-1FC00>..<reserved-1FFFD>
ZZZZ          ; Emoji                # E0.0   [1] (?)        not a code point
";

pub const EMOJI_SEQUENCES: &str = "\
# emoji-sequences.txt
00A9 FE0F      ; Basic_Emoji                 ; copyright                          # E0.6   [1] (©️)
261D FE0F      ; Basic_Emoji                 ; index pointing up                  # E0.6   [1] (☝️)
0023 FE0F 20E3 ; Emoji_Keycap_Sequence       ; keycap: \\x{23}                     # E0.6   [1] (#️⃣)
1F1FA 1F1F8    ; RGI_Emoji_Flag_Sequence     ; flag: United States                # E0.6   [1] (🇺🇸)
261D 1F3FB     ; RGI_Emoji_Modifier_Sequence ; index pointing up: light skin tone # E1.0   [1] (☝🏻)
";

pub const EMOJI_ZWJ_SEQUENCES: &str = "\
# emoji-zwj-sequences.txt
1F468 200D 1F4BB                       ; RGI_Emoji_ZWJ_Sequence ; man technologist                   # E4.0   [1] (👨‍💻)
1F468 1F3FB 200D 1F4BB                 ; RGI_Emoji_ZWJ_Sequence ; man technologist: light skin tone  # E4.0   [1] (👨🏻‍💻)
1F9D1 200D 1F91D 200D 1F9D1            ; RGI_Emoji_ZWJ_Sequence ; people holding hands               # E12.0  [1] (🧑‍🤝‍🧑)
1F9D1 1F3FB 200D 1F91D 200D 1F9D1 1F3FC ; RGI_Emoji_ZWJ_Sequence ; people holding hands: light skin tone, medium-light skin tone # E12.1 [1] (🧑🏻‍🤝‍🧑🏼)
";

pub const VARIATION_SEQUENCES: &str = "\
# emoji-variation-sequences.txt
00A9 FE0E ; text style;  # (1.1) COPYRIGHT SIGN
00A9 FE0F ; emoji style; # (1.1) COPYRIGHT SIGN
261D FE0E ; text style;  # (1.1) WHITE UP POINTING INDEX
261D FE0F ; emoji style; # (1.1) WHITE UP POINTING INDEX
";

pub const UNICODE_DATA: &str = "\
0023;NUMBER SIGN;Po;0;ET;;;;;N;;;;;
00A9;COPYRIGHT SIGN;So;0;ON;;;;;N;;;;;
200D;ZERO WIDTH JOINER;Cf;0;BN;;;;;N;;;;;
20E3;COMBINING ENCLOSING KEYCAP;Me;0;NSM;;;;;N;;;;;
FE0F;VARIATION SELECTOR-16;Mn;0;NSM;;;;;N;;;;;
1F1F8;REGIONAL INDICATOR SYMBOL LETTER S;So;0;L;;;;;N;;;;;
1F1FA;REGIONAL INDICATOR SYMBOL LETTER U;So;0;L;;;;;N;;;;;
";

pub const EMOTICONS: &str = r#"{ "1f600": ":D", "1F602": ":')" }"#;

/// Names used for single code points in the generated `emoji-test.txt`.
pub const SHORT_NAMES: &[(&str, &str)] = &[
    ("261D", "index pointing up"),
    ("1F44B", "waving hand"),
    ("1F468", "man"),
    ("1F4BB", "laptop"),
    ("1F600", "grinning face"),
    ("1F601", "beaming face with smiling eyes"),
    ("1F602", "face with tears of joy"),
    ("1F91D", "handshake"),
    ("1F9D1", "person"),
    ("1F3FB", "light skin tone"),
    ("1F3FC", "medium-light skin tone"),
    ("1F3FD", "medium skin tone"),
    ("1F3FE", "medium-dark skin tone"),
    ("1F3FF", "dark skin tone"),
];

fn glyph(hexcode: &str) -> String {
    hexcode
        .split('-')
        .filter_map(|token| u32::from_str_radix(token, 16).ok())
        .filter_map(char::from_u32)
        .collect()
}

fn short_name(hexcode: &str) -> &'static str {
    SHORT_NAMES
        .iter()
        .find(|(code, _)| *code == hexcode)
        .map_or("emoji", |(_, name)| *name)
}

fn push_entry(out: &mut String, hexcode: &str, status: &str, name: &str) {
    let codepoints = hexcode.replace('-', " ");
    writeln!(
        out,
        "{codepoints:<40}; {status:<20}# {} E1.0 {name}",
        glyph(hexcode)
    )
    .unwrap();
}

/// Official list matching the fixture sources, in `emoji-test.txt` format.
pub fn emoji_test() -> String {
    let mut out = String::from("# emoji-test.txt\n\n# group: Smileys & Emotion\n\n# subgroup: face-smiling\n");
    for code in ["1F600", "1F601", "1F602"] {
        push_entry(&mut out, code, "fully-qualified", short_name(code));
    }

    out.push_str("\n# group: People & Body\n\n# subgroup: hand-fingers-open\n");
    push_entry(&mut out, "1F44B", "fully-qualified", "waving hand");
    for tone in TONES {
        push_entry(&mut out, &format!("1F44B-{tone}"), "fully-qualified", "waving hand: tone");
    }

    out.push_str("\n# subgroup: hand-single-finger\n");
    push_entry(&mut out, "261D-FE0F", "fully-qualified", "index pointing up");
    push_entry(&mut out, "261D", "unqualified", "index pointing up");
    for tone in TONES {
        push_entry(&mut out, &format!("261D-{tone}"), "fully-qualified", "index pointing up: tone");
    }

    out.push_str("\n# subgroup: person\n");
    for base in ["1F9D1", "1F468"] {
        push_entry(&mut out, base, "fully-qualified", short_name(base));
        for tone in TONES {
            push_entry(&mut out, &format!("{base}-{tone}"), "fully-qualified", "person: tone");
        }
    }

    out.push_str("\n# subgroup: person-role\n");
    push_entry(&mut out, "1F468-200D-1F4BB", "fully-qualified", "man technologist");
    for tone in TONES {
        push_entry(
            &mut out,
            &format!("1F468-{tone}-200D-1F4BB"),
            "fully-qualified",
            "man technologist: tone",
        );
    }

    out.push_str("\n# subgroup: family\n");
    push_entry(&mut out, "1F9D1-200D-1F91D-200D-1F9D1", "fully-qualified", "people holding hands");
    for first in TONES {
        for second in TONES {
            push_entry(
                &mut out,
                &format!("1F9D1-{first}-200D-1F91D-200D-1F9D1-{second}"),
                "fully-qualified",
                "people holding hands: tones",
            );
        }
    }
    push_entry(&mut out, "1F91D", "fully-qualified", "handshake");

    out.push_str("\n# group: Component\n\n# subgroup: skin-tone\n");
    for tone in TONES {
        push_entry(&mut out, tone, "component", short_name(tone));
    }

    out.push_str("\n# group: Objects\n\n# subgroup: computer\n");
    push_entry(&mut out, "1F4BB", "fully-qualified", "laptop");

    out.push_str("\n# group: Symbols\n\n# subgroup: other-symbol\n");
    push_entry(&mut out, "00A9-FE0F", "fully-qualified", "copyright");
    push_entry(&mut out, "00A9", "unqualified", "copyright");

    out.push_str("\n# subgroup: keycap\n");
    push_entry(&mut out, "0023-FE0F-20E3", "fully-qualified", "keycap: #");
    push_entry(&mut out, "0023-20E3", "unqualified", "keycap: #");

    out.push_str("\n# group: Flags\n\n# subgroup: country-flag\n");
    push_entry(&mut out, "1F1FA-1F1F8", "fully-qualified", "flag: United States");

    out
}

/// Writes the full fixture tree under `<root>/<VERSION>/`.
pub fn write_fixture(root: &Path) {
    write_fixture_with(root, |_, text| text)
}

/// Like [`write_fixture`], letting the caller rewrite any file by name.
pub fn write_fixture_with(root: &Path, mut edit: impl FnMut(&str, String) -> String) {
    let dir = root.join(VERSION);
    std::fs::create_dir_all(&dir).unwrap();

    let files = [
        ("emoji-data.txt", EMOJI_DATA.to_string()),
        ("emoji-sequences.txt", EMOJI_SEQUENCES.to_string()),
        ("emoji-zwj-sequences.txt", EMOJI_ZWJ_SEQUENCES.to_string()),
        ("emoji-variation-sequences.txt", VARIATION_SEQUENCES.to_string()),
        ("emoji-test.txt", emoji_test()),
        ("UnicodeData.txt", UNICODE_DATA.to_string()),
        ("emoticons.json", EMOTICONS.to_string()),
    ];
    for (name, text) in files {
        std::fs::write(dir.join(name), edit(name, text)).unwrap();
    }
}

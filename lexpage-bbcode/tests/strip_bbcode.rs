use lexpage_bbcode::{BbcodeOptions, BbcodeRenderer, strip_bbcode};

#[test]
fn test_strip_removes_inline_tags() {
  assert_eq!(
    strip_bbcode("[b]gras[/b] et [i]italique[/i] [color=red]rouge[/color]"),
    "gras et italique rouge"
  );
}

#[test]
fn test_strip_keeps_link_text() {
  assert_eq!(strip_bbcode("[url=http://lexpage.net]Lexpage[/url]"), "Lexpage");
  assert_eq!(
    strip_bbcode("[url]http://lexpage.net[/url]"),
    "http://lexpage.net"
  );
  assert_eq!(
    strip_bbcode("voir http://lexpage.net !"),
    "voir http://lexpage.net !"
  );
}

#[test]
fn test_strip_frames_quotes() {
  assert_eq!(strip_bbcode("[quote]citation[/quote]"), " citation ");
  assert_eq!(strip_bbcode("[quote=Lex]Bonjour[/quote]"), " Lex: Bonjour ");
}

#[test]
fn test_strip_sign_keeps_text_only() {
  assert_eq!(strip_bbcode("[sign=:-)]Bisous[/sign]"), "Bisous");
}

#[test]
fn test_strip_block_code_and_escaping() {
  assert_eq!(
    strip_bbcode("avant\n\n[code]\nx < 1\n[/code]\n\naprès"),
    "avantx &lt; 1apr&egrave;s"
  );
}

#[test]
fn test_strip_leaves_smileys_and_newlines() {
  assert_eq!(strip_bbcode(":-)\n;-)"), ":-)\n;-)");
}

#[test]
fn test_strip_leaves_malformed_markup() {
  assert_eq!(strip_bbcode("[b]ouvert [i]x"), "[b]ouvert [i]x");
}

#[test]
fn test_strip_is_idempotent() {
  let inputs = [
    "[quote=Lex][b]Salut[/b] tout le monde[/quote]\n[code]x[/code]",
    "[spoiler]Dark Vador est son p[/spoiler] [url=http://a.com]b[/url]",
    "[quote][quote]a[/quote]b[/quote]",
    "rien a enlever",
  ];
  for input in inputs {
    let once = strip_bbcode(input);
    assert_eq!(strip_bbcode(&once), once, "input: {input}");
  }
}

#[test]
fn test_renderer_strip_matches_free_function() {
  let renderer = BbcodeRenderer::new(BbcodeOptions::default());
  let input = "[quote=A][b]x[/b][/quote] [size=2]y[/size]";
  assert_eq!(renderer.strip(input), strip_bbcode(input));
}

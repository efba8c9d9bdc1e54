//! Text normalization pipeline for quoted spec descriptions.
//!
//! Fixed stage order: strip non-ASCII -> lowercase -> strip punctuation ->
//! lemmatize (every token treated as a verb) -> join with single spaces.
//! Each stage consumes the previous stage's token list.

use unicode_normalization::UnicodeNormalization;

/// Split raw quoted text into whitespace-separated tokens.
/// Punctuation stays attached here; it is stripped later in the pipeline.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_string).collect()
}

/// NFKD-decompose each token and drop every non-ASCII character.
/// Accented letters degrade to their base form ("é" -> "e"); characters with
/// no ASCII base form are dropped entirely.
pub fn remove_non_ascii(words: Vec<String>) -> Vec<String> {
	words.into_iter().map(|word| word.nfkd().filter(char::is_ascii).collect()).collect()
}

/// Lowercase every character of every token, locale-independent.
pub fn to_lowercase(words: Vec<String>) -> Vec<String> {
	words.into_iter().map(|word| word.to_lowercase()).collect()
}

/// Remove every character that is neither alphanumeric nor whitespace.
/// Tokens left empty by the stripping are dropped from the sequence.
pub fn remove_punctuation(words: Vec<String>) -> Vec<String> {
	words
		.into_iter()
		.map(|word| word.chars().filter(|c| c.is_alphanumeric() || c.is_whitespace()).collect::<String>())
		.filter(|word| !word.is_empty())
		.collect()
}

/// Reduce each token to a dictionary base form, treating every token as a verb.
pub fn lemmatize(words: Vec<String>) -> Vec<String> {
	words.into_iter().map(|word| lemmatize_verb(&word)).collect()
}

/// Run the full pipeline over a token list and join the survivors with single
/// spaces. A list that normalizes to zero tokens yields the empty string.
pub fn normalize(words: Vec<String>) -> String {
	let words = remove_non_ascii(words);
	let words = to_lowercase(words);
	let words = remove_punctuation(words);
	let words = lemmatize(words);
	words.join(" ")
}

/// Irregular verb forms that suffix detachment gets wrong.
/// Keyed on the inflected form; values are the lemma.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
	("am", "be"),
	("is", "be"),
	("are", "be"),
	("was", "be"),
	("were", "be"),
	("been", "be"),
	("being", "be"),
	("has", "have"),
	("had", "have"),
	("having", "have"),
	("does", "do"),
	("did", "do"),
	("done", "do"),
	("goes", "go"),
	("went", "go"),
	("gone", "go"),
	("ran", "run"),
	("made", "make"),
	("said", "say"),
	("got", "get"),
	("gotten", "get"),
	("took", "take"),
	("taken", "take"),
	("came", "come"),
	("saw", "see"),
	("seen", "see"),
	("found", "find"),
	("gave", "give"),
	("given", "give"),
	("knew", "know"),
	("known", "know"),
	("thought", "think"),
	("brought", "bring"),
	("built", "build"),
	("sent", "send"),
	("kept", "keep"),
	("left", "leave"),
	("meant", "mean"),
	("met", "meet"),
	("held", "hold"),
	("wrote", "write"),
	("written", "write"),
	("stood", "stand"),
	("lost", "lose"),
	("paid", "pay"),
	("fell", "fall"),
	("fallen", "fall"),
	("felt", "feel"),
	("became", "become"),
	("began", "begin"),
	("begun", "begin"),
	("chose", "choose"),
	("chosen", "choose"),
	("ate", "eat"),
	("eaten", "eat"),
];

/// WordNet-style detachment rules for verbs, tried in order:
/// strip the suffix, append the replacement, keep the first candidate that is
/// a known verb lemma.
const DETACHMENT_RULES: &[(&str, &str)] = &[("s", ""), ("ies", "y"), ("ied", "y"), ("es", "e"), ("es", ""), ("ed", "e"), ("ed", ""), ("ing", "e"), ("ing", "")];

/// Base-form verbs common in test descriptions. Candidates produced by the
/// detachment rules are validated against this list, standing in for a full
/// dictionary lookup.
const VERB_LEMMAS: &[&str] = &[
	"accept", "access", "add", "allocate", "allow", "apply", "assign", "attach", "become", "begin", "bind", "block", "bring", "build", "call", "cancel", "change", "check", "choose",
	"clean", "clear", "close", "collect", "come", "configure", "confirm", "connect", "contain", "copy", "crash", "create", "curl", "delete", "deny", "deploy", "detach", "disable",
	"discover", "do", "drain", "drop", "eat", "enable", "ensure", "evict", "execute", "expect", "expose", "fail", "fall", "feel", "fetch", "filter", "find", "finish", "fix", "forward",
	"get", "give", "go", "handle", "have", "hit", "hold", "initialize", "inject", "inspect", "install", "issue", "keep", "kill", "know", "label", "launch", "leave", "list", "listen",
	"load", "log", "lose", "make", "map", "match", "mean", "meet", "migrate", "mount", "move", "notice", "observe", "open", "pass", "patch", "pause", "pay", "perform", "ping", "poll",
	"probe", "provision", "pull", "push", "query", "reach", "read", "receive", "recover", "recreate", "register", "reject", "release", "remove", "rename", "replace", "report",
	"require", "resolve", "respond", "restart", "restore", "resume", "retry", "return", "roll", "rotate", "route", "run", "save", "say", "scale", "schedule", "see", "select", "send",
	"serve", "set", "show", "shut", "skip", "stand", "start", "stop", "succeed", "support", "switch", "sync", "take", "terminate", "test", "think", "time", "trigger", "try", "update",
	"upgrade", "use", "validate", "verify", "wait", "watch", "work", "write",
];

fn is_known_lemma(word: &str) -> bool {
	VERB_LEMMAS.binary_search(&word).is_ok()
}

/// Verb lemmatization mirroring WordNet's morphy: exception table first, then
/// suffix detachment with dictionary validation (plus doubled-consonant
/// reduction, "stopped" -> "stopp" -> "stop"). A word no rule resolves is
/// returned unchanged, same as the reference lemmatizer for words outside its
/// vocabulary.
fn lemmatize_verb(word: &str) -> String {
	if let Some((_, lemma)) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == word) {
		return (*lemma).to_string();
	}
	if is_known_lemma(word) {
		return word.to_string();
	}

	for (suffix, replacement) in DETACHMENT_RULES {
		let Some(stem) = word.strip_suffix(suffix) else { continue };
		if stem.is_empty() {
			continue;
		}

		let candidate = format!("{stem}{replacement}");
		if is_known_lemma(&candidate) {
			return candidate;
		}
		if replacement.is_empty()
			&& let Some(undoubled) = undouble(&candidate)
			&& is_known_lemma(&undoubled)
		{
			return undoubled;
		}
	}

	word.to_string()
}

/// "runn" -> "run"; None when the final two characters are not a doubled
/// consonant.
fn undouble(stem: &str) -> Option<String> {
	let chars: Vec<char> = stem.chars().collect();
	let n = chars.len();
	if n >= 3 && chars[n - 1] == chars[n - 2] && is_consonant(chars[n - 1]) {
		return Some(chars[..n - 1].iter().collect());
	}
	None
}

fn is_consonant(c: char) -> bool {
	c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

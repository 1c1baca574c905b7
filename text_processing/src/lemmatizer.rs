//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! A rule based english lemmatizer.
//!
//! Irregular forms are looked up in exception tables, everything else is
//! reduced by detaching the inflectional suffix of the part of speech
//! (the "morphy" rules known from WordNet). There is no lexicon to validate
//! a candidate against, so the silent `e` dropped by `-ing`, `-ed` and `-er`
//! is restored by spelling heuristics.

use serde::{Deserialize, Serialize};

/// The part of speech used to select the detachment rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Guesses the part of speech of a lowercase [word] from the exception
    /// tables and its suffix.
    pub fn guess(word: &str) -> Self {
        if adjective_exception(word).is_some() {
            return PartOfSpeech::Adjective;
        }
        if verb_exception(word).is_some() {
            return PartOfSpeech::Verb;
        }
        if noun_exception(word).is_some() || is_invariant(word) {
            return PartOfSpeech::Noun;
        }
        let len = word.len();
        if len >= 5 && word.ends_with("ly") {
            PartOfSpeech::Adverb
        } else if len >= 5 && word.ends_with("ing") {
            PartOfSpeech::Verb
        } else if len >= 4 && word.ends_with("ed") {
            PartOfSpeech::Verb
        } else if len >= 5 && (word.ends_with("iest") || word.ends_with("ier")) {
            PartOfSpeech::Adjective
        } else if len >= 6 && word.ends_with("est") {
            PartOfSpeech::Adjective
        } else if ["ous", "ful", "able", "ible", "ive", "less"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            PartOfSpeech::Adjective
        } else {
            PartOfSpeech::Noun
        }
    }
}

/// Reduces lowercase words to their dictionary form.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Lemmatizer {
    /// Candidates shorter than this are rejected and the word is kept.
    pub min_stem_length: usize,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self { min_stem_length: 3 }
    }
}

impl Lemmatizer {
    pub const fn new(min_stem_length: usize) -> Self {
        Self { min_stem_length }
    }

    /// Lemmatizes [word] with a guessed part of speech.
    pub fn lemmatize_guessing(&self, word: &str) -> String {
        self.lemmatize(word, PartOfSpeech::guess(word))
    }

    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        let exception = match pos {
            PartOfSpeech::Noun => noun_exception(word),
            PartOfSpeech::Verb => verb_exception(word),
            PartOfSpeech::Adjective => adjective_exception(word),
            PartOfSpeech::Adverb => adverb_exception(word),
        };
        if let Some(lemma) = exception {
            return lemma.to_string();
        }
        if word.len() < 4 || !word.is_ascii() || is_invariant(word) {
            return word.to_string();
        }
        let candidate = match pos {
            PartOfSpeech::Noun => detach_noun(word),
            PartOfSpeech::Verb => detach_verb(word),
            PartOfSpeech::Adjective => detach_adjective(word),
            PartOfSpeech::Adverb => None,
        };
        match candidate {
            Some(lemma) if self.is_valid(&lemma) => lemma,
            _ => word.to_string(),
        }
    }

    fn is_valid(&self, candidate: &str) -> bool {
        candidate.len() >= self.min_stem_length && has_vowel(candidate)
    }
}

fn detach_noun(word: &str) -> Option<String> {
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ies") {
        let with_ie = format!("{stem}ie");
        return if IE_NOUNS.contains(&with_ie.as_str()) {
            Some(with_ie)
        } else {
            Some(format!("{stem}y"))
        };
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.len() >= 6 && word.ends_with("men") {
        return Some(format!("{}man", &word[..word.len() - 3]));
    }
    word.strip_suffix('s').map(str::to_string)
}

fn detach_verb(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
        return Some(format!("{stem}y"));
    }
    if word.ends_with("eed") {
        // succeed, exceed: only the past tense of an `ee` verb loses the `d`.
        let stem = &word[..word.len() - 1];
        return EE_VERBS.contains(&stem).then(|| stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ing").or_else(|| word.strip_suffix("ed")) {
        return Some(restore_stem(stem));
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes", "oes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    if word.ends_with("ss") {
        return None;
    }
    word.strip_suffix('s').map(str::to_string)
}

fn detach_adjective(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("iest").or_else(|| word.strip_suffix("ier")) {
        return Some(format!("{stem}y"));
    }
    let stem = word.strip_suffix("est").or_else(|| word.strip_suffix("er"))?;
    Some(restore_stem(stem))
}

/// Undoes the spelling changes of a stem whose suffix was detached.
/// `stopp` → `stop`, `lov` → `love`, `mak` → `make`.
fn restore_stem(stem: &str) -> String {
    if let Some(undoubled) = undouble(stem) {
        undoubled.to_string()
    } else if needs_silent_e(stem) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

#[inline]
fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

#[inline]
fn is_consonant(c: u8) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

fn has_vowel(word: &str) -> bool {
    word.bytes().any(|c| is_vowel(c) || c == b'y')
}

/// Removes a doubled final consonant, `ll`, `ss`, `zz` and `ff` are kept.
/// Three letter stems like `add` keep their double.
fn undouble(stem: &str) -> Option<&str> {
    let b = stem.as_bytes();
    let n = b.len();
    if n >= 4
        && b[n - 1] == b[n - 2]
        && is_consonant(b[n - 1])
        && !matches!(b[n - 1], b'l' | b's' | b'z' | b'f')
    {
        Some(&stem[..n - 1])
    } else {
        None
    }
}

fn needs_silent_e(stem: &str) -> bool {
    let b = stem.as_bytes();
    let n = b.len();
    if n < 3 {
        return false;
    }
    let last = b[n - 1];
    let before = b[n - 2];
    let third = b[n - 3];

    // Short stems with a single vowel between consonants: mak, hop, shak, smil.
    let vowel_count = b.iter().filter(|c| is_vowel(**c)).count();
    if n <= 4
        && vowel_count == 1
        && is_consonant(third)
        && is_vowel(before)
        && is_consonant(last)
        && !matches!(last, b'w' | b'x' | b'y')
    {
        return true;
    }

    match last {
        b'v' | b'c' => true,
        b'z' => is_vowel(before),
        b'l' => is_consonant(before) && !matches!(before, b'l' | b'r' | b'w'),
        b'g' => {
            before == b'd'
                || before == b'r'
                || (before == b'n' && matches!(third, b'a' | b'e') && n >= 5)
                || (before == b'a' && is_consonant(third) && n >= 5)
        }
        b's' => {
            matches!(before, b'r' | b'n' | b'p' | b'o' | b'a' | b'i')
                || (before == b'u' && is_consonant(third) && n >= 4)
        }
        b't' => before == b'a' && is_consonant(third) && n >= 4,
        b'r' => matches!(before, b'u' | b'i') && is_consonant(third) && n >= 5,
        b'd' => matches!(before, b'u' | b'i') && is_consonant(third) && n >= 5,
        b'm' => before == b'o' && is_consonant(third) && n >= 5,
        _ => false,
    }
}

/// Verbs ending in `ee`, their past tense ends in `eed`.
const EE_VERBS: &[&str] = &[
    "agree", "disagree", "free", "guarantee", "decree", "referee", "flee", "foresee",
    "oversee", "emcee", "tee", "knee", "glee", "pedigree", "degree", "squeegee",
];

/// Nouns ending in `ie`, their plural is not formed with `y` → `ies`.
const IE_NOUNS: &[&str] = &[
    "movie", "zombie", "cookie", "rookie", "hippie", "indie", "goalie", "pie", "tie", "lie",
    "die", "auntie", "sweetie", "newbie", "freebie", "calorie", "prairie", "genie", "brownie",
    "selfie", "hoodie", "techie", "bookie", "yuppie", "cutie", "birdie", "collie", "sortie",
    "talkie", "walkie", "quickie", "groupie", "junkie", "hottie", "smoothie", "pixie", "bogie",
    "boogie", "veggie", "budgie", "lassie", "aussie", "kiddie",
];

/// Words that look inflected but are not.
fn is_invariant(word: &str) -> bool {
    matches!(
        word,
        "nothing" | "something" | "anything" | "everything" | "thing" | "king" | "ring"
            | "morning" | "evening" | "wedding" | "ceiling" | "during" | "pudding" | "sibling"
            | "darling" | "string" | "spring" | "swing" | "sting" | "wing" | "bring" | "sing"
            | "indeed" | "hundred" | "sacred" | "naked" | "wicked" | "kindred" | "seed"
            | "speed" | "need" | "feed" | "greed" | "breed" | "bleed" | "deed" | "weed"
            | "series" | "species" | "news" | "chaos" | "lens" | "physics" | "politics"
            | "ethics" | "economics" | "mathematics" | "always" | "perhaps" | "sometimes"
            | "besides" | "towards" | "afterwards" | "nowadays" | "whereas" | "yes" | "thanks"
            | "soldier" | "cashier" | "frontier" | "barrier" | "carrier" | "premier"
            | "glacier" | "courier" | "pier" | "interest" | "forest" | "request" | "protest"
            | "contest" | "conquest" | "honest" | "modest" | "harvest" | "manifest"
            | "suggest" | "digest" | "arrest" | "invest" | "earnest" | "specimen" | "abdomen"
            | "omen" | "amen" | "bed" | "red" | "shed"
    )
}

fn noun_exception(word: &str) -> Option<&'static str> {
    Some(match word {
        "men" => "man",
        "women" => "woman",
        "children" => "child",
        "feet" => "foot",
        "teeth" => "tooth",
        "mice" => "mouse",
        "geese" => "goose",
        "lives" => "life",
        "wives" => "wife",
        "knives" => "knife",
        "wolves" => "wolf",
        "leaves" => "leaf",
        "thieves" => "thief",
        "shelves" => "shelf",
        "halves" => "half",
        "selves" => "self",
        "heroes" => "hero",
        "potatoes" => "potato",
        "tomatoes" => "tomato",
        "echoes" => "echo",
        "criteria" => "criterion",
        "phenomena" => "phenomenon",
        "analyses" => "analysis",
        "crises" => "crisis",
        "theses" => "thesis",
        "movies" => "movie",
        _ => return None,
    })
}

fn verb_exception(word: &str) -> Option<&'static str> {
    Some(match word {
        "am" | "is" | "are" | "was" | "were" | "been" | "being" => "be",
        "has" | "had" | "having" => "have",
        "does" | "did" | "done" | "doing" => "do",
        "went" | "gone" | "goes" | "going" => "go",
        "saw" | "seen" | "sees" | "seeing" => "see",
        "made" => "make",
        "took" | "taken" => "take",
        "gave" | "given" => "give",
        "came" => "come",
        "got" | "gotten" => "get",
        "knew" | "known" => "know",
        "thought" => "think",
        "told" => "tell",
        "said" => "say",
        "found" => "find",
        "felt" => "feel",
        "left" => "leave",
        "kept" => "keep",
        "began" | "begun" => "begin",
        "brought" => "bring",
        "bought" => "buy",
        "ran" => "run",
        "wrote" | "written" => "write",
        "sat" => "sit",
        "stood" => "stand",
        "understood" => "understand",
        "heard" => "hear",
        "held" => "hold",
        "lost" => "lose",
        "met" => "meet",
        "paid" => "pay",
        "sent" => "send",
        "spent" => "spend",
        "built" => "build",
        "fell" | "fallen" => "fall",
        "forgot" | "forgotten" => "forget",
        "chose" | "chosen" => "choose",
        "drove" | "driven" => "drive",
        "ate" | "eaten" => "eat",
        "fought" => "fight",
        "caught" => "catch",
        "taught" => "teach",
        "meant" => "mean",
        "led" => "lead",
        "sang" | "sung" => "sing",
        "spoke" | "spoken" => "speak",
        "broke" | "broken" => "break",
        "woke" | "woken" => "wake",
        "won" => "win",
        "shot" => "shoot",
        "hid" | "hidden" => "hide",
        "became" => "become",
        "dies" | "died" | "dying" => "die",
        "lies" | "lied" | "lying" => "lie",
        "ties" | "tied" | "tying" => "tie",
        "used" | "using" => "use",
        "created" | "creating" => "create",
        "focused" | "focusing" => "focus",
        _ => return None,
    })
}

fn adjective_exception(word: &str) -> Option<&'static str> {
    Some(match word {
        "better" | "best" => "good",
        "worse" | "worst" => "bad",
        "less" | "least" => "little",
        "further" | "furthest" | "farther" | "farthest" => "far",
        "elder" | "eldest" => "old",
        _ => return None,
    })
}

fn adverb_exception(word: &str) -> Option<&'static str> {
    Some(match word {
        "better" | "best" => "well",
        "harder" | "hardest" => "hard",
        "further" | "farther" => "far",
        _ => return None,
    })
}

#[cfg(test)]
mod test {
    use super::{Lemmatizer, PartOfSpeech};

    fn lemma(word: &str, pos: PartOfSpeech) -> String {
        Lemmatizer::default().lemmatize(word, pos)
    }

    #[test]
    fn plural_nouns_are_reduced() {
        assert_eq!("film", lemma("films", PartOfSpeech::Noun));
        assert_eq!("movie", lemma("movies", PartOfSpeech::Noun));
        assert_eq!("zombie", lemma("zombies", PartOfSpeech::Noun));
        assert_eq!("story", lemma("stories", PartOfSpeech::Noun));
        assert_eq!("actress", lemma("actresses", PartOfSpeech::Noun));
        assert_eq!("watch", lemma("watches", PartOfSpeech::Noun));
        assert_eq!("box", lemma("boxes", PartOfSpeech::Noun));
        assert_eq!("scene", lemma("scenes", PartOfSpeech::Noun));
        assert_eq!("policeman", lemma("policemen", PartOfSpeech::Noun));
        assert_eq!("child", lemma("children", PartOfSpeech::Noun));
    }

    #[test]
    fn singular_nouns_are_kept() {
        assert_eq!("class", lemma("class", PartOfSpeech::Noun));
        assert_eq!("glass", lemma("glass", PartOfSpeech::Noun));
        assert_eq!("bonus", lemma("bonus", PartOfSpeech::Noun));
        assert_eq!("analysis", lemma("analysis", PartOfSpeech::Noun));
        assert_eq!("series", lemma("series", PartOfSpeech::Noun));
        assert_eq!("always", lemma("always", PartOfSpeech::Noun));
        assert_eq!("gas", lemma("gas", PartOfSpeech::Noun));
    }

    #[test]
    fn verbs_are_reduced() {
        assert_eq!("stop", lemma("stopped", PartOfSpeech::Verb));
        assert_eq!("run", lemma("running", PartOfSpeech::Verb));
        assert_eq!("love", lemma("loved", PartOfSpeech::Verb));
        assert_eq!("make", lemma("making", PartOfSpeech::Verb));
        assert_eq!("hope", lemma("hoping", PartOfSpeech::Verb));
        assert_eq!("hop", lemma("hopping", PartOfSpeech::Verb));
        assert_eq!("try", lemma("tried", PartOfSpeech::Verb));
        assert_eq!("play", lemma("playing", PartOfSpeech::Verb));
        assert_eq!("watch", lemma("watched", PartOfSpeech::Verb));
        assert_eq!("produce", lemma("produced", PartOfSpeech::Verb));
        assert_eq!("realize", lemma("realized", PartOfSpeech::Verb));
        assert_eq!("amaze", lemma("amazing", PartOfSpeech::Verb));
        assert_eq!("disappoint", lemma("disappointing", PartOfSpeech::Verb));
        assert_eq!("agree", lemma("agreed", PartOfSpeech::Verb));
        assert_eq!("fall", lemma("falling", PartOfSpeech::Verb));
        assert_eq!("settle", lemma("settled", PartOfSpeech::Verb));
        assert_eq!("change", lemma("changing", PartOfSpeech::Verb));
    }

    #[test]
    fn base_forms_are_stable() {
        let lemmatizer = Lemmatizer::default();
        for word in [
            "succeed", "exceed", "proceed", "need", "agree", "free", "guarantee", "add", "love",
            "make", "watch", "movie", "film", "story", "actor", "great", "character", "plot",
            "music", "direct", "write", "interest",
        ] {
            assert_eq!(word, lemmatizer.lemmatize_guessing(word), "{word}");
        }
    }

    #[test]
    fn inflections_share_the_base_form() {
        let lemmatizer = Lemmatizer::default();
        for (word, expected) in [
            ("succeeded", "succeed"),
            ("succeeds", "succeed"),
            ("exceeded", "exceed"),
            ("proceeding", "proceed"),
            ("agreed", "agree"),
            ("freed", "free"),
            ("guaranteed", "guarantee"),
            ("added", "add"),
            ("adding", "add"),
            ("stopped", "stop"),
        ] {
            assert_eq!(expected, lemmatizer.lemmatize_guessing(word), "{word}");
        }
    }

    #[test]
    fn irregular_verbs_use_exceptions() {
        assert_eq!("be", lemma("was", PartOfSpeech::Verb));
        assert_eq!("go", lemma("went", PartOfSpeech::Verb));
        assert_eq!("see", lemma("saw", PartOfSpeech::Verb));
        assert_eq!("write", lemma("written", PartOfSpeech::Verb));
    }

    #[test]
    fn adjectives_are_reduced() {
        assert_eq!("good", lemma("better", PartOfSpeech::Adjective));
        assert_eq!("big", lemma("biggest", PartOfSpeech::Adjective));
        assert_eq!("funny", lemma("funniest", PartOfSpeech::Adjective));
        assert_eq!("nice", lemma("nicest", PartOfSpeech::Adjective));
        assert_eq!("great", lemma("greatest", PartOfSpeech::Adjective));
    }

    #[test]
    fn adverbs_only_change_by_exception() {
        assert_eq!("really", lemma("really", PartOfSpeech::Adverb));
        assert_eq!("well", lemma("best", PartOfSpeech::Adverb));
    }

    #[test]
    fn short_words_are_kept() {
        assert_eq!("bed", lemma("bed", PartOfSpeech::Verb));
        assert_eq!("its", lemma("its", PartOfSpeech::Noun));
        assert_eq!("going", Lemmatizer::new(3).lemmatize("going", PartOfSpeech::Noun));
    }

    #[test]
    fn part_of_speech_is_guessed() {
        assert_eq!(PartOfSpeech::Adverb, PartOfSpeech::guess("actually"));
        assert_eq!(PartOfSpeech::Verb, PartOfSpeech::guess("watching"));
        assert_eq!(PartOfSpeech::Verb, PartOfSpeech::guess("went"));
        assert_eq!(PartOfSpeech::Adjective, PartOfSpeech::guess("best"));
        assert_eq!(PartOfSpeech::Adjective, PartOfSpeech::guess("beautiful"));
        assert_eq!(PartOfSpeech::Noun, PartOfSpeech::guess("movies"));
        assert_eq!(PartOfSpeech::Noun, PartOfSpeech::guess("nothing"));
    }

    #[test]
    fn guessing_lemmatizes_review_words() {
        let lemmatizer = Lemmatizer::default();
        let lemmas: Vec<String> = "loved the movies acting was amazing best characters"
            .split(' ')
            .map(|word| lemmatizer.lemmatize_guessing(word))
            .collect();
        assert_eq!(
            vec!["love", "the", "movie", "act", "be", "amaze", "good", "character"],
            lemmas
        );
    }
}

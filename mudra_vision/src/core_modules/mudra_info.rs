// THEORY:
// The `mudra_info` module is the bridge between a classifier label and the text a
// presentation layer shows next to it. It is a static table and a forgiving
// lookup, nothing more.
//
// Lookup order: exact name, then substring containment in either direction
// (first record in declaration order wins), then a placeholder built from the
// query itself. A caller always gets a record back.

/// A static metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MudraRecord {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub meaning: &'static str,
    pub usage: &'static str,
}

/// The record handed to callers; owned so the placeholder can echo the query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MudraInfo {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub meaning: String,
    pub usage: String,
}

impl From<&MudraRecord> for MudraInfo {
    fn from(record: &MudraRecord) -> Self {
        Self {
            name: record.name.to_owned(),
            description: record.description.to_owned(),
            image: Some(record.image.to_owned()),
            meaning: record.meaning.to_owned(),
            usage: record.usage.to_owned(),
        }
    }
}

const PLACEHOLDER_DESCRIPTION: &str = "No description available for this mudra.";
const PLACEHOLDER_USAGE: &str = "Classical Indian dance gesture.";

/// Looks up display metadata for a label such as `"Suchi Mudra"` or
/// `"Suchi Mudra Detected"`.
pub fn describe(label: &str) -> MudraInfo {
    let clean = label.trim();
    let clean = clean.strip_suffix(" Detected").unwrap_or(clean).trim();

    // --- 1. Exact Match ---
    if let Some(record) = MUDRA_RECORDS.iter().find(|r| r.name == clean) {
        return record.into();
    }

    // --- 2. Partial Match ---
    if !clean.is_empty() {
        let partial = MUDRA_RECORDS
            .iter()
            .find(|r| r.name.contains(clean) || clean.contains(r.name));
        if let Some(record) = partial {
            return record.into();
        }
    }

    // --- 3. Placeholder ---
    MudraInfo {
        name: clean.to_owned(),
        description: PLACEHOLDER_DESCRIPTION.to_owned(),
        image: None,
        meaning: clean.to_owned(),
        usage: PLACEHOLDER_USAGE.to_owned(),
    }
}

/// Every record name, in declaration order.
pub fn all_mudras() -> impl Iterator<Item = &'static str> {
    MUDRA_RECORDS.iter().map(|r| r.name)
}

pub static MUDRA_RECORDS: [MudraRecord; 27] = [
    MudraRecord {
        name: "Pataka Mudra",
        description: "The flag mudra. All fingers are extended and held together with the thumb tucked in. Represents flags, wings, clouds, forests, and night.",
        image: "Pataka.jpg",
        meaning: "Flag",
        usage: "Used to depict objects like clouds, forest, forbidding, and waves in classical dance.",
    },
    MudraRecord {
        name: "Tripataka Mudra",
        description: "Three parts of a flag. Index, middle, and pinky fingers are extended while the ring finger is bent. Represents crown, tree, flame, and thunderbolt.",
        image: "Tripataka.jpg",
        meaning: "Three parts of a flag",
        usage: "Used to show a crown, trees, flames, and various emotional expressions.",
    },
    MudraRecord {
        name: "Mayura Mudra",
        description: "The peacock mudra. Similar to Tripataka but with thumb touching the bent ring finger. Symbolizes the beautiful peacock and grace.",
        image: "Mayura.jpg",
        meaning: "Peacock",
        usage: "Depicts peacocks, applying tilak, and expressing beauty and grace.",
    },
    MudraRecord {
        name: "Ardha Chandra Mudra",
        description: "The half-moon mudra. All fingers are extended with thumb at an angle. Represents the crescent moon, hands, and sacred objects.",
        image: "Ardhachandra.jpg",
        meaning: "Half Moon",
        usage: "Used to depict the moon, hand gestures, and objects held in the hand.",
    },
    MudraRecord {
        name: "Arala Mudra",
        description: "The bent mudra. Index finger is bent while other fingers are extended. Represents drinking poison, consuming nectar, and tasting.",
        image: "Arala.jpg",
        meaning: "Bent",
        usage: "Used for actions like drinking, tasting, and applying poison.",
    },
    MudraRecord {
        name: "Suchi Mudra",
        description: "The needle mudra. Only the index finger is extended upward while others are folded. Represents pointing, number one, and divine figures.",
        image: "Suchi.jpg",
        meaning: "Needle/Index",
        usage: "Used for pointing directions, showing oneness, and depicting Lord Shiva.",
    },
    MudraRecord {
        name: "Mukula Mudra",
        description: "The bud mudra. All fingertips are brought together forming a bud shape. Represents flowers, eating, and offering.",
        image: "Mukula.jpg",
        meaning: "Bud",
        usage: "Used to depict eating, offering flowers, and lotus buds.",
    },
    MudraRecord {
        name: "Musthi Mudra",
        description: "The fist mudra. All fingers are clenched forming a fist. Represents strength, holding objects, and firmness.",
        image: "Musti.jpg",
        meaning: "Fist",
        usage: "Used to show strength, grasping objects, and determination.",
    },
    MudraRecord {
        name: "Shikharam Mudra",
        description: "The peak mudra. All fingers clenched with thumb extended upward. Represents Shiva's form, lingam, and mountain peaks.",
        image: "Sikharam.jpg",
        meaning: "Peak/Summit",
        usage: "Used to depict Lord Shiva, lingam, and towering structures.",
    },
    MudraRecord {
        name: "Kapitha Mudra",
        description: "The wood apple mudra. Index finger bent with thumb touching, other fingers folded. Represents Lakshmi, Saraswati, and holding objects.",
        image: "Kapittha.jpg",
        meaning: "Wood Apple",
        usage: "Used to depict goddesses Lakshmi and Saraswati, and holding small objects.",
    },
    MudraRecord {
        name: "Katakamukha Mudra",
        description: "The opening in a bracelet. Ring and pinky extended, index and middle bent with thumb. Represents picking flowers, tying knots, and arrows.",
        image: "Katakamukha.jpg",
        meaning: "Opening in bracelet",
        usage: "Used for plucking flowers, stringing garlands, and holding arrows.",
    },
    MudraRecord {
        name: "Chandrakala Mudra",
        description: "The moon's digit. Index and thumb extended while others are folded. Represents the crescent moon and delicate beauty.",
        image: "Chandrakala.jpg",
        meaning: "Moon's digit",
        usage: "Used to depict the crescent moon and gentle expressions.",
    },
    MudraRecord {
        name: "Hamsasya Mudra",
        description: "The swan's beak. Thumb and index tips touch while other fingers are extended. Represents swan, picking up objects, and delicacy.",
        image: "Hamsasya.jpg",
        meaning: "Swan's beak",
        usage: "Used to show swans, picking flowers, and painting.",
    },
    MudraRecord {
        name: "Hamsapaksha Mudra",
        description: "The swan's wing. Fingers arranged to resemble a swan's wing. Represents wings, flying, and graceful movement.",
        image: "Hamsapaksa.jpg",
        meaning: "Swan's wing",
        usage: "Used to depict wings, birds in flight, and graceful movements.",
    },
    MudraRecord {
        name: "Ardhapataka Mudra",
        description: "Half flag mudra. Index and middle fingers extended, ring and pinky bent. Represents rivers, roads, and boundaries.",
        image: "Ardhapataka.jpg",
        meaning: "Half flag",
        usage: "Used to show rivers, roads, and dividing boundaries.",
    },
    MudraRecord {
        name: "Kartari Mukham Mudra",
        description: "The scissors mudra. Index and middle fingers extended like scissors. Represents separation, lightning, and sharp objects.",
        image: "Kartarimukha.jpg",
        meaning: "Scissors face",
        usage: "Used to depict scissors, lightning, and the forked tongue of a serpent.",
    },
    MudraRecord {
        name: "Simhamukha Mudra",
        description: "The lion's face. Fingers arranged to resemble a lion's face. Represents the fierce lion and courage.",
        image: "Simhamukha.jpg",
        meaning: "Lion's face",
        usage: "Used to depict the powerful lion and fierce expressions.",
    },
    MudraRecord {
        name: "Bhramara Mudra",
        description: "The bee mudra. Thumb and middle finger touch while index is curled. Represents the humming bee and delicate movements.",
        image: "Bharma.jpg",
        meaning: "Bee",
        usage: "Used to show bees, insects, and gentle circular movements.",
    },
    MudraRecord {
        name: "Sarpashirsha Mudra",
        description: "The serpent's head. All fingers extended and brought together. Represents the cobra's hood and serpent movements.",
        image: "Sarpashirsa.jpg",
        meaning: "Serpent's head",
        usage: "Used to depict snakes, serpent deities, and snake charmers.",
    },
    MudraRecord {
        name: "Mrigasheersha Mudra",
        description: "The deer's head. Thumb and pinky extended while others are folded. Represents deer, calling someone, and gentle animals.",
        image: "Mrugashirsha-Hasta.jpg",
        meaning: "Deer's head",
        usage: "Used to show deer, calling gestures, and feminine beauty.",
    },
    MudraRecord {
        name: "Padmakosha Mudra",
        description: "The lotus bud. Fingers curved forming a lotus bud shape. Represents the unopened lotus, fruits, and fullness.",
        image: "Padmakosa.jpg",
        meaning: "Lotus bud",
        usage: "Used to depict lotus buds, round fruits, and bells.",
    },
    MudraRecord {
        name: "Alapadma Mudra",
        description: "The blooming lotus. Fingers spread apart like a blooming flower. Represents the fully opened lotus and expansion.",
        image: "Alapadma.jpg",
        meaning: "Blooming lotus",
        usage: "Used to show blooming flowers, sunrise, and opening gestures.",
    },
    MudraRecord {
        name: "Chatura Mudra",
        description: "The square mudra. Fingers held straight and close together with thumb tucked. Represents stability, four directions, and balance.",
        image: "Chautra.jpg",
        meaning: "Square/Four",
        usage: "Used to depict the four directions, square shapes, and balanced movements.",
    },
    MudraRecord {
        name: "Kangulashya Mudra",
        description: "The finger nail mudra. Ring finger bent while others are extended. Represents specific gestures and delicate movements.",
        image: "Kangula.jpg",
        meaning: "Fingernail",
        usage: "Used for specific gestures and delicate artistic expressions.",
    },
    MudraRecord {
        name: "Tamrachuda Mudra",
        description: "The rooster mudra. Index half-bent with thumb touching other fingers. Represents the rooster and morning announcements.",
        image: "Tamracuda.jpg",
        meaning: "Rooster",
        usage: "Used to depict roosters, cocks, and dawn.",
    },
    MudraRecord {
        name: "Trishula Mudra",
        description: "The trident mudra. Index, middle, and ring fingers extended. Represents Lord Shiva's trident and power.",
        image: "Trisula.jpg",
        meaning: "Trident",
        usage: "Used to depict Lord Shiva's weapon and divine power.",
    },
    MudraRecord {
        name: "Shuka Tundam Mudra",
        description: "The parrot's beak. Middle and pinky extended, others bent. Represents the parrot and bird calls.",
        image: "Sukatunda.jpg",
        meaning: "Parrot's beak",
        usage: "Used to show parrots, birds, and chirping sounds.",
    },
];

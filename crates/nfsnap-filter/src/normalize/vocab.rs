//! Word lists Nextflow draws run names from (`<adjective>_<scientist>`).
//!
//! Both tables are kept in byte order so lookups can binary-search.

pub const ADJECTIVES: &[&str] = &[
    "admiring",
    "adoring",
    "agitated",
    "amazing",
    "angry",
    "astonishing",
    "awesome",
    "backstabbing",
    "berserk",
    "big",
    "boring",
    "chaotic",
    "cheeky",
    "cheesy",
    "clever",
    "compassionate",
    "condescending",
    "confident",
    "cranky",
    "crazy",
    "curious",
    "deadly",
    "desperate",
    "determined",
    "distracted",
    "distraught",
    "disturbed",
    "dreamy",
    "drunk",
    "ecstatic",
    "elated",
    "elegant",
    "evil",
    "exotic",
    "extravagant",
    "fabulous",
    "fervent",
    "festering",
    "focused",
    "friendly",
    "furious",
    "gigantic",
    "gloomy",
    "golden",
    "goofy",
    "grave",
    "happy",
    "high",
    "hopeful",
    "hungry",
    "infallible",
    "insane",
    "intergalactic",
    "irreverent",
    "jolly",
    "jovial",
    "kickass",
    "lethal",
    "lonely",
    "loquacious",
    "loving",
    "mad",
    "magical",
    "maniac",
    "marvelous",
    "mighty",
    "modest",
    "nasty",
    "naughty",
    "nauseous",
    "nice",
    "nostalgic",
    "peaceful",
    "pedantic",
    "pensive",
    "prickly",
    "reverent",
    "ridiculous",
    "romantic",
    "sad",
    "scruffy",
    "serene",
    "sharp",
    "shrivelled",
    "sick",
    "silly",
    "sleepy",
    "small",
    "soggy",
    "special",
    "spontaneous",
    "stoic",
    "stupefied",
    "suspicious",
    "tender",
    "thirsty",
    "tiny",
    "trusting",
    "voluminous",
    "wise",
    "zen",
];

pub const SCIENTISTS: &[&str] = &[
    "agnesi",
    "albattani",
    "allen",
    "almeida",
    "ampere",
    "angela",
    "archimedes",
    "ardinghelli",
    "aryabhata",
    "austin",
    "avogadro",
    "babbage",
    "baekeland",
    "banach",
    "bardeen",
    "bartik",
    "bassi",
    "becquerel",
    "bell",
    "bernard",
    "bhabha",
    "bhaskara",
    "blackwell",
    "bohr",
    "boltzmann",
    "booth",
    "borg",
    "bose",
    "boyd",
    "brahmagupta",
    "brattain",
    "brazil",
    "brenner",
    "brown",
    "cajal",
    "cantor",
    "caravaggio",
    "carlsson",
    "carson",
    "celsius",
    "chandrasekhar",
    "church",
    "colden",
    "cori",
    "coulomb",
    "cray",
    "crick",
    "curie",
    "curran",
    "curry",
    "cuvier",
    "dalembert",
    "darwin",
    "davinci",
    "descartes",
    "dijkstra",
    "dubinsky",
    "easley",
    "edison",
    "einstein",
    "ekeblad",
    "elion",
    "engelbart",
    "escher",
    "euclid",
    "euler",
    "faggin",
    "faraday",
    "fermat",
    "fermi",
    "feynman",
    "fourier",
    "franklin",
    "galileo",
    "gates",
    "gauss",
    "gautier",
    "gilbert",
    "goldberg",
    "goldstine",
    "goldwasser",
    "golick",
    "goodall",
    "gutenberg",
    "hamilton",
    "hawking",
    "heisenberg",
    "heyrovsky",
    "hilbert",
    "hirsch",
    "hodgkin",
    "hoover",
    "hopper",
    "hugle",
    "hypatia",
    "jang",
    "jennings",
    "jepsen",
    "joliot",
    "jones",
    "kalam",
    "kalman",
    "kare",
    "kay",
    "keller",
    "khorana",
    "kilby",
    "kimura",
    "kirch",
    "knuth",
    "koch",
    "kowalevski",
    "lagrange",
    "lalande",
    "lamarck",
    "lamarr",
    "lamport",
    "laplace",
    "lattes",
    "lavoisier",
    "leakey",
    "leavitt",
    "legentil",
    "leibniz",
    "lichterman",
    "linnaeus",
    "liskov",
    "lorenz",
    "lovelace",
    "lumiere",
    "magritte",
    "mahavira",
    "majorana",
    "mandelbrot",
    "marconi",
    "maxwell",
    "mayer",
    "mccarthy",
    "mcclintock",
    "mclean",
    "mcnulty",
    "meitner",
    "mendel",
    "meninsky",
    "mercator",
    "mestorf",
    "meucci",
    "miescher",
    "minsky",
    "mirzakhani",
    "monod",
    "montalcini",
    "moriondo",
    "morse",
    "murdock",
    "neumann",
    "newton",
    "nightingale",
    "nobel",
    "noether",
    "northcutt",
    "noyce",
    "ochoa",
    "panini",
    "pare",
    "pasteur",
    "pauling",
    "payne",
    "perlman",
    "pesquet",
    "picasso",
    "pike",
    "planck",
    "plateau",
    "poincare",
    "poisson",
    "poitras",
    "ptolemy",
    "raman",
    "ramanujan",
    "ride",
    "ritchie",
    "roentgen",
    "rosalind",
    "rubens",
    "rutherford",
    "saha",
    "salas",
    "sammet",
    "sanger",
    "sax",
    "shannon",
    "shaw",
    "shirley",
    "shockley",
    "sinoussi",
    "snyder",
    "solvay",
    "spence",
    "stallman",
    "stone",
    "stonebraker",
    "swanson",
    "swartz",
    "swirles",
    "tesla",
    "thompson",
    "torricelli",
    "torvalds",
    "tuckerman",
    "turing",
    "varahamihira",
    "venter",
    "visvesvaraya",
    "volhard",
    "volta",
    "waddington",
    "watson",
    "wegener",
    "wescoff",
    "wiles",
    "williams",
    "wilson",
    "wing",
    "woese",
    "wozniak",
    "wright",
    "yalow",
    "yonath",
];

pub fn is_adjective(word: &str) -> bool {
    ADJECTIVES.binary_search(&word).is_ok()
}

pub fn is_scientist(word: &str) -> bool {
    SCIENTISTS.binary_search(&word).is_ok()
}

/// True when `adjective_scientist` could be a generated run name.
pub fn is_run_name(adjective: &str, scientist: &str) -> bool {
    is_adjective(adjective) && is_scientist(scientist)
}

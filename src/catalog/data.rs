//! Muscle table
//!
//! The fixed set of records shown by the flashcard view, in display order.

use super::{Category, MuscleRecord};

pub(super) static MUSCLES: [MuscleRecord; 10] = [
    MuscleRecord {
        id: 1,
        name: "Biceps Brachii",
        image_url: "https://images.pexels.com/photos/1552242/pexels-photo-1552242.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Tweekoppige armspier aan de voorkant van de bovenarm",
        origin: "Scapula (lange kop: tuberculum supraglenoidale, korte kop: processus coracoideus)",
        insertion: "Radius (tuberositas radii)",
        function: "Flexie elleboog, supinatie onderarm, flexie schouder",
        category: Category::Arm,
    },
    MuscleRecord {
        id: 2,
        name: "Triceps Brachii",
        image_url: "https://images.pexels.com/photos/1552106/pexels-photo-1552106.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Driekoppige armspier aan de achterkant van de bovenarm",
        origin: "Scapula en humerus (lange kop: tuberculum infraglenoidale, laterale kop: humerus lateraal, mediale kop: humerus mediaal)",
        insertion: "Ulna (olecranon)",
        function: "Extensie elleboog, extensie schouder (lange kop)",
        category: Category::Arm,
    },
    MuscleRecord {
        id: 3,
        name: "Quadriceps Femoris",
        image_url: "https://images.pexels.com/photos/1552252/pexels-photo-1552252.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Vierkoppige dijbeenspier aan de voorkant van het bovenbeen",
        origin: "Ilium en femur (4 koppen: rectus femoris, vastus lateralis, vastus medialis, vastus intermedius)",
        insertion: "Tibia (via patella en ligamentum patellae)",
        function: "Extensie knie, flexie heup (rectus femoris)",
        category: Category::Leg,
    },
    MuscleRecord {
        id: 4,
        name: "Hamstrings",
        image_url: "https://images.pexels.com/photos/1552249/pexels-photo-1552249.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Hamstringspieren aan de achterkant van het bovenbeen",
        origin: "Ischium (biceps femoris, semitendinosus, semimembranosus)",
        insertion: "Tibia en fibula",
        function: "Flexie knie, extensie heup",
        category: Category::Leg,
    },
    MuscleRecord {
        id: 5,
        name: "Gastrocnemius",
        image_url: "https://images.pexels.com/photos/1552248/pexels-photo-1552248.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Tweekoppige kuitspier",
        origin: "Femur (condylus medialis en lateralis)",
        insertion: "Calcaneus (via achillespees)",
        function: "Plantairflexie voet, flexie knie",
        category: Category::Leg,
    },
    MuscleRecord {
        id: 6,
        name: "Deltoideus",
        image_url: "https://images.pexels.com/photos/1552103/pexels-photo-1552103.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Deltaspier van de schouder",
        origin: "Clavicula, acromion en spina scapulae",
        insertion: "Humerus (tuberositas deltoidea)",
        function: "Abductie, flexie en extensie schouder",
        category: Category::Arm,
    },
    MuscleRecord {
        id: 7,
        name: "Pectoralis Major",
        image_url: "https://images.pexels.com/photos/1552100/pexels-photo-1552100.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Grote borstspier",
        origin: "Clavicula, sternum en ribben",
        insertion: "Humerus (crista tuberculi majoris)",
        function: "Adductie, flexie en interne rotatie schouder",
        category: Category::Core,
    },
    MuscleRecord {
        id: 8,
        name: "Latissimus Dorsi",
        image_url: "https://images.pexels.com/photos/1552097/pexels-photo-1552097.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Brede rugspier",
        origin: "Wervelkolom (T7-L5), ilium en ribben",
        insertion: "Humerus (crista tuberculi minoris)",
        function: "Adductie, extensie en interne rotatie schouder",
        category: Category::Back,
    },
    MuscleRecord {
        id: 9,
        name: "Rectus Abdominis",
        image_url: "https://images.pexels.com/photos/1552101/pexels-photo-1552101.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Rechte buikspier",
        origin: "Symphysis pubis en os pubis",
        insertion: "Ribben 5-7 en processus xiphoideus",
        function: "Flexie romp, stabilisatie bekken",
        category: Category::Core,
    },
    MuscleRecord {
        id: 10,
        name: "Trapezius",
        image_url: "https://images.pexels.com/photos/1552095/pexels-photo-1552095.jpeg?auto=compress&cs=tinysrgb&w=400",
        description: "Trapeziumspier van de rug en nek",
        origin: "Occiput, ligamentum nuchae en wervelkolom (C7-T12)",
        insertion: "Clavicula, acromion en spina scapulae",
        function: "Elevatie, retractie en rotatie scapula",
        category: Category::Back,
    },
];

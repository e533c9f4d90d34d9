use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::scene::display::FontRole;

/// Raw bytes of one font file plus the family it was selected as.
#[derive(Clone)]
pub struct FontFace {
    pub family: String,
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// OpenType weight class (400 regular, 700 bold).
    pub weight: u16,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Faces used for each [`FontRole`]. Any role may be missing.
#[derive(Clone, Debug, Default)]
pub struct FontSet {
    pub sans: Option<FontFace>,
    pub sans_bold: Option<FontFace>,
    pub mono: Option<FontFace>,
}

const SANS_FAMILIES: &[&str] = &[
    "Inter",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];
const MONO_FAMILIES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "SF Mono",
    "Menlo",
    "Consolas",
    "Courier New",
];

impl FontSet {
    /// No fonts: text items are skipped at render time.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve faces from `fonts_dir` and the system font directories.
    ///
    /// Families found in `fonts_dir` are tried before the built-in family lists.
    pub fn discover(fonts_dir: Option<&Path>) -> Self {
        let mut db = fontdb::Database::new();
        let (mut own_sans, mut own_mono) = (Vec::new(), Vec::new());
        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, dir);
            for face in db.faces() {
                let Some((name, _)) = face.families.first() else {
                    continue;
                };
                let list = if face.monospaced {
                    &mut own_mono
                } else {
                    &mut own_sans
                };
                if !list.contains(name) {
                    list.push(name.clone());
                }
            }
        }
        db.load_system_fonts();
        Self::select(&db, &own_sans, &own_mono)
    }

    fn select(db: &fontdb::Database, own_sans: &[String], own_mono: &[String]) -> Self {
        let sans_names = family_list(own_sans, SANS_FAMILIES);
        let mono_names = family_list(own_mono, MONO_FAMILIES);
        let sans = select_face(
            db,
            &sans_names,
            fontdb::Family::SansSerif,
            fontdb::Weight::NORMAL,
        );
        let sans_bold = select_face(
            db,
            &sans_names,
            fontdb::Family::SansSerif,
            fontdb::Weight::BOLD,
        );
        let mono = select_face(
            db,
            &mono_names,
            fontdb::Family::Monospace,
            fontdb::Weight::NORMAL,
        );

        let set = Self {
            sans,
            sans_bold,
            mono,
        };
        if set.is_empty() {
            tracing::warn!(
                faces = db.faces().count(),
                "no usable font faces found; text will not be drawn"
            );
        } else {
            tracing::debug!(
                sans = ?set.sans.as_ref().map(|f| &f.family),
                sans_bold = ?set.sans_bold.as_ref().map(|f| &f.family),
                mono = ?set.mono.as_ref().map(|f| &f.family),
                "resolved fonts"
            );
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.sans.is_none() && self.sans_bold.is_none() && self.mono.is_none()
    }

    /// Face for `role`, falling back to any other available face.
    pub fn face_for(&self, role: FontRole) -> Option<&FontFace> {
        let preferred = match role {
            FontRole::Sans => [&self.sans, &self.sans_bold, &self.mono],
            FontRole::SansBold => [&self.sans_bold, &self.sans, &self.mono],
            FontRole::Mono => [&self.mono, &self.sans, &self.sans_bold],
        };
        preferred.into_iter().find_map(Option::as_ref)
    }
}

fn family_list<'a>(preferred: &'a [String], builtin: &[&'a str]) -> Vec<&'a str> {
    preferred
        .iter()
        .map(String::as_str)
        .chain(builtin.iter().copied())
        .collect()
}

fn select_face(
    db: &fontdb::Database,
    named: &[&str],
    generic: fontdb::Family<'_>,
    weight: fontdb::Weight,
) -> Option<FontFace> {
    let mut families: Vec<fontdb::Family<'_>> =
        named.iter().map(|n| fontdb::Family::Name(n)).collect();
    families.push(generic);

    let query = fontdb::Query {
        families: &families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))?;

    let info = db.face(id)?;
    let family = info
        .families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let weight = info.weight.0;
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    Some(FontFace {
        family,
        bytes: Arc::new(bytes),
        index,
        weight,
    })
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "fonts dir not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to load font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;

//! Column model for the country table.
//!
//! Each column carries a header plus a renderer variant; the presenter
//! dispatches on the variant instead of poking at record fields by name.
//! Image columns do not resolve their URI eagerly, they hand it to the
//! deferred-loading cell machinery.

use crate::models::country::Country;

pub enum Cell {
    /// Plain text derived from the record.
    Text(fn(&Country) -> String),
    /// An image reference rendered through a deferred-loading cell.
    Image(fn(&Country) -> &str),
}

pub struct Column {
    pub header: &'static str,
    pub width: u16,
    pub cell: Cell,
}

pub const COLUMNS: [Column; 7] = [
    Column {
        header: "Country Name",
        width: 24,
        cell: Cell::Text(name),
    },
    Column {
        header: "Code",
        width: 5,
        cell: Cell::Text(code),
    },
    Column {
        header: "Capital",
        width: 18,
        cell: Cell::Text(capital),
    },
    Column {
        header: "Phone Code",
        width: 10,
        cell: Cell::Text(phone),
    },
    Column {
        header: "Population",
        width: 12,
        cell: Cell::Text(population),
    },
    Column {
        header: "Flag",
        width: 14,
        cell: Cell::Image(flag),
    },
    Column {
        header: "Emblem",
        width: 14,
        cell: Cell::Image(emblem),
    },
];

fn name(c: &Country) -> String {
    c.name.clone()
}

fn code(c: &Country) -> String {
    c.abbreviation.clone()
}

fn capital(c: &Country) -> String {
    c.capital.clone()
}

fn phone(c: &Country) -> String {
    c.phone.clone()
}

fn population(c: &Country) -> String {
    c.population.to_string()
}

fn flag(c: &Country) -> &str {
    &c.media.flag
}

fn emblem(c: &Country) -> &str {
    &c.media.emblem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::country::Media;

    #[test]
    fn image_columns_expose_the_media_uris() {
        let country = Country {
            name: "France".to_string(),
            abbreviation: "FR".to_string(),
            capital: "Paris".to_string(),
            phone: "33".to_string(),
            population: 67_000_000,
            media: Media {
                flag: "https://flagcdn.com/fr.svg".to_string(),
                emblem: "https://example.org/fr.png".to_string(),
            },
            continent: "Europe".to_string(),
        };

        let mut text_headers = Vec::new();
        let mut image_uris = Vec::new();
        for column in &COLUMNS {
            match &column.cell {
                Cell::Text(_) => text_headers.push(column.header),
                Cell::Image(accessor) => image_uris.push(accessor(&country)),
            }
        }

        assert_eq!(
            text_headers,
            vec!["Country Name", "Code", "Capital", "Phone Code", "Population"]
        );
        assert_eq!(
            image_uris,
            vec!["https://flagcdn.com/fr.svg", "https://example.org/fr.png"]
        );
    }
}

pub mod cascade;
pub mod extensions;
pub mod language;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod quality;
pub mod release_group;

pub use cascade::{parse_title, ExtractionResult, TitleFamily};
pub use extensions::remove_file_extension;
pub use language::parse_language;
pub use model::{ArtistTitleInfo, Language, ParsedAlbumInfo, ParsedTrackInfo};
pub use normalize::{clean_artist_name, normalize, normalize_title, NormalizedTitle, RejectedInput};
pub use parser::{parse_album_title, parse_artist_name, parse_music_title};
pub use quality::{NoQuality, Quality, QualityDetect};
pub use release_group::parse_release_group;

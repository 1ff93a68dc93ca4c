use html_escape::encode_double_quoted_attribute;

use crate::models::photo::Photo;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>PhotoBooth</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      justify-content: center;
      align-items: center;
      flex-direction: column;
    }
    .gallery {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      justify-content: center;
    }
    .photo-item {
      flex: 1 1 calc(25% - 10px);
      max-width: calc(25% - 10px);
    }
    .photo-item img {
      width: 100%;
      height: auto;
      border-radius: 5px;
    }
    @media (max-width: 768px) {
      .photo-item {
        flex: 1 1 calc(50% - 10px);
        max-width: calc(50% - 10px);
      }
    }
    @media (max-width: 480px) {
      .photo-item {
        flex: 1 1 100%;
        max-width: 100%;
      }
    }
  </style>
</head>
<body>
  <h1>PhotoBooth Gallery</h1>
  <div class="gallery">
"#;

const FOOT: &str = r#"  </div>
  <p><a href="./u">Upload</a></p>
</body>
</html>
"#;

/// Renders the gallery with one image per photo, in the order given.
pub fn render_gallery(photos: &[Photo]) -> String {
    let items: String = photos.iter().map(photo_item).collect();
    format!("{HEAD}{items}{FOOT}")
}

pub fn render_gallery_error() -> String {
    "<h1>Failed to load photos</h1>".to_string()
}

fn photo_item(photo: &Photo) -> String {
    format!(
        "    <div class=\"photo-item\"><img src=\"{}\" alt=\"Photo\"></div>\n",
        encode_double_quoted_attribute(&photo.url)
    )
}

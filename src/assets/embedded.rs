//! Compiled-in HTML pages
//!
//! Default mode: the upload form ships inside the binary so the server
//! works without any files on disk.

use async_trait::async_trait;

use super::{Asset, AssetSource};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>File Upload</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            max-width: 600px;
            margin: 60px auto;
            padding: 0 20px;
            line-height: 1.6;
        }
        h1 {
            font-size: 1.6em;
        }
        form {
            padding: 20px;
            border: 1px solid #ccc;
            border-radius: 8px;
        }
        button {
            margin-left: 10px;
        }
    </style>
</head>
<body>
    <h1>File Upload</h1>
    <p>Select a file and upload it to the server.</p>
    <form enctype="multipart/form-data" action="/upload" method="post">
        <input type="file" name="myFile">
        <button type="submit">Upload</button>
    </form>
    <p><a href="/files">Uploaded files</a></p>
</body>
</html>
"#;

/// Serves the compiled-in pages
pub struct EmbeddedAssets;

#[async_trait]
impl AssetSource for EmbeddedAssets {
    async fn load(&self, path: &str) -> Option<Asset> {
        match path {
            "/" | "/index.html" | "/index.htm" => {
                Some((INDEX_HTML.as_bytes().to_vec(), "text/html; charset=utf-8"))
            }
            _ => None,
        }
    }

    fn describe(&self) -> String {
        "embedded pages".to_string()
    }
}

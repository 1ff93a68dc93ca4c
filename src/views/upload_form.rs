const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Upload Photo</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      justify-content: center;
      align-items: center;
      height: 100vh;
      flex-direction: column;
    }
    .upload-form {
      text-align: center;
    }
    .upload-form input, .upload-form button {
      margin: 5px;
    }
  </style>
</head>
<body>
  <h1>Upload a Photo</h1>
  <div class="upload-form">
    <form action="/upload" method="POST" enctype="multipart/form-data">
      <input type="text" name="authId" autocomplete="off" placeholder="Enter Authorization ID" required>
      <input type="file" name="photo" accept="image/*" required>
      <button type="submit">Upload Photo</button>
    </form>
  </div>
</body>
</html>
"#;

pub fn render_upload_form() -> &'static str {
    PAGE
}

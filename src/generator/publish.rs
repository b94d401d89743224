use log::info;

use crate::error::Result;
use crate::models::TemplateDocument;
use crate::utils::file::write_file_atomic;

/// Serialize the merged document and replace the output file with it
///
/// # Returns
/// The number of bytes written
pub async fn publish(document: &TemplateDocument, output_path: &str) -> Result<usize> {
    let yaml = document.to_yaml()?;
    write_file_atomic(output_path, yaml.as_bytes()).await?;
    info!("Merged config saved to {}", output_path);
    Ok(yaml.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_writes_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let doc = TemplateDocument::from_str("port: 7890\nmode: rule\n", "t.yaml").unwrap();

        let written = publish(&doc, path.to_str().unwrap()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "port: 7890\nmode: rule\n");
        assert_eq!(written, content.len());
    }
}

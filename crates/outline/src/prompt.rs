//! Instructions sent to the text-generation service.

/// System instruction for every outline request.
pub const SYSTEM_PROMPT: &str = "You are a presentation expert. Return ONLY valid JSON arrays. \
Never use markdown formatting. Create detailed, informative content with complete sentences. \
CRITICAL: Separate bullet points with actual newline characters (\\n), not commas or semicolons.";

/// Build the user instruction for a deck about `topic` with `slide_count` slides.
pub fn outline_prompt(topic: &str, slide_count: usize) -> String {
    format!(
        r#"Create a professional PowerPoint presentation outline about "{topic}" with EXACTLY {slide_count} slides.

CRITICAL FORMATTING RULES:
1. First slide MUST be slide_type: "title" with a title and subtitle
2. Last slide MUST be slide_type: "conclusion"
3. Middle slides should be slide_type: "content" or "image_focus"
4. Each content slide should have 3-5 bullet points
5. Each bullet point should be a complete sentence (15-20 words)
6. SEPARATE EACH BULLET POINT WITH ACTUAL NEWLINES (\n) - NOT commas or periods
7. Make content informative and detailed, NOT just keywords
8. Include specific image search terms for visual slides

Return ONLY a valid JSON array with this EXACT structure:
[
  {{
    "title": "Main Title Here",
    "subtitle": "Engaging subtitle",
    "content": "",
    "slide_type": "title",
    "image_query": ""
  }},
  {{
    "title": "Content Slide Title",
    "content": "First detailed bullet point as a complete sentence\nSecond detailed point with explanation\nThird point with context",
    "slide_type": "content",
    "image_query": "relevant image search term"
  }},
  {{
    "title": "Conclusion",
    "content": "Key takeaway one with details\nKey takeaway two with context\nFinal thoughts",
    "slide_type": "conclusion",
    "image_query": ""
  }}
]

IMPORTANT: Use actual newline characters (\n) to separate bullet points in the "content" field.
NO markdown, NO code blocks, JUST the JSON array. Make content substantive and informative."#
    )
}
